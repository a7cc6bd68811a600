//! Error types for numeric operations
//!
//! Every arithmetic entry point returns a `NumResult<Value>`. The VM's error
//! propagation path branches on [`NumericError::kind`] to raise the matching
//! language-level exception.

use thiserror::Error;

/// The four error classes surfaced to the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operand type not accepted by the receiver for this operation
    Coerce,
    /// Integer division or modulo by exactly zero
    ZeroDivision,
    /// Literal text does not parse
    Format,
    /// A magnitude cannot be realized as a machine-sized count
    OutOfRange,
}

/// Literal parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// No digits were found
    #[error("invalid integer format")]
    InvalidFormat,

    /// Explicit base outside `2..=36`
    #[error("invalid integer base {0}")]
    InvalidBase(u32),

    /// Character that is not a base-10 digit
    #[error("illegal characters in integer: {0}")]
    IllegalCharacter(char),

    /// Character that is not a digit of the given base
    #[error("illegal characters in integer (base {base}): {character}")]
    IllegalCharacterInBase {
        /// Base the literal was parsed in
        base: u32,
        /// Offending character
        character: char,
    },

    /// Strict-width accumulation overflowed; `saturated` is the width's
    /// maximum (or minimum, for negative signed literals)
    #[error("value overflows")]
    ValueOverflows {
        /// Saturated bit pattern of the overflowing literal
        saturated: u64,
    },

    /// Float literal rejected by the float parser
    #[error("invalid float format: {0}")]
    InvalidFloat(String),
}

impl FormatError {
    /// Illegal character error, using the short form for base 10.
    pub fn illegal_character(base: u32, character: char) -> Self {
        if base == 10 {
            FormatError::IllegalCharacter(character)
        } else {
            FormatError::IllegalCharacterInBase { base, character }
        }
    }
}

/// Numeric runtime error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// Right operand cannot be coerced into the receiver's type
    #[error("`{right}` can't be coerced into `{left}`")]
    Coerce {
        /// Receiver type name
        left: String,
        /// Operand type name
        right: String,
    },

    /// Shift amount (or receiver) is not integer-like
    #[error("`{type_name}` can't be used as a bitshift operand")]
    BitshiftOperand {
        /// Offending type name
        type_name: String,
    },

    /// Division or modulo by an integer zero
    #[error("divided by 0")]
    ZeroDivision,

    /// Literal parse failure
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Magnitude does not fit a machine-sized count
    #[error("{0}")]
    OutOfRange(String),
}

impl NumericError {
    /// Create a coercion error: `right` can't be coerced into `left`
    pub fn coerce<L: Into<String>, R: Into<String>>(left: L, right: R) -> Self {
        NumericError::Coerce {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a bitshift operand error
    pub fn bitshift_operand<S: Into<String>>(type_name: S) -> Self {
        NumericError::BitshiftOperand {
            type_name: type_name.into(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        NumericError::OutOfRange(msg.into())
    }

    /// Error class, used by the VM to choose the exception to raise
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::Coerce { .. } | NumericError::BitshiftOperand { .. } => {
                ErrorKind::Coerce
            }
            NumericError::ZeroDivision => ErrorKind::ZeroDivision,
            NumericError::Format(_) => ErrorKind::Format,
            NumericError::OutOfRange(_) => ErrorKind::OutOfRange,
        }
    }
}

/// Result type alias for numeric operations
pub type NumResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumericError::coerce("Std::Int8", "Std::Int16");
        assert_eq!(
            err.to_string(),
            "`Std::Int16` can't be coerced into `Std::Int8`"
        );

        let err = NumericError::bitshift_operand("Std::Float");
        assert_eq!(
            err.to_string(),
            "`Std::Float` can't be used as a bitshift operand"
        );

        let err: NumericError = FormatError::ValueOverflows { saturated: 255 }.into();
        assert_eq!(err.to_string(), "value overflows");
    }

    #[test]
    fn test_format_error_messages() {
        assert_eq!(
            FormatError::InvalidFormat.to_string(),
            "invalid integer format"
        );
        assert_eq!(
            FormatError::InvalidBase(37).to_string(),
            "invalid integer base 37"
        );
        assert_eq!(
            FormatError::illegal_character(10, 'z').to_string(),
            "illegal characters in integer: z"
        );
        assert_eq!(
            FormatError::illegal_character(16, 'g').to_string(),
            "illegal characters in integer (base 16): g"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(NumericError::coerce("a", "b").kind(), ErrorKind::Coerce);
        assert_eq!(
            NumericError::bitshift_operand("Std::Nil").kind(),
            ErrorKind::Coerce
        );
        assert_eq!(NumericError::ZeroDivision.kind(), ErrorKind::ZeroDivision);
        assert_eq!(
            NumericError::from(FormatError::InvalidFormat).kind(),
            ErrorKind::Format
        );
        assert_eq!(
            NumericError::out_of_range("too big").kind(),
            ErrorKind::OutOfRange
        );
    }
}
