//! Type descriptors used to label values in error messages.
//!
//! The runtime's class table is an external collaborator; this crate only
//! reads names through the [`TypeNames`] capability, so arithmetic stays
//! pure and testable without a live runtime.

use std::collections::HashMap;
use std::fmt;

/// Simplified type tag for [`Value`](crate::value::Value) variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    SmallInt,
    BigInt,
    Float,
    BigFloat,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Nil,
    Bool,
    String,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 17] = [
        ValueKind::SmallInt,
        ValueKind::BigInt,
        ValueKind::Float,
        ValueKind::BigFloat,
        ValueKind::Int8,
        ValueKind::Int16,
        ValueKind::Int32,
        ValueKind::Int64,
        ValueKind::UInt8,
        ValueKind::UInt16,
        ValueKind::UInt32,
        ValueKind::UInt64,
        ValueKind::Float32,
        ValueKind::Float64,
        ValueKind::Nil,
        ValueKind::Bool,
        ValueKind::String,
    ];

    /// Identifier used in configuration files (`small_int`, `uint8`, ...).
    pub fn config_key(self) -> &'static str {
        match self {
            ValueKind::SmallInt => "small_int",
            ValueKind::BigInt => "big_int",
            ValueKind::Float => "float",
            ValueKind::BigFloat => "big_float",
            ValueKind::Int8 => "int8",
            ValueKind::Int16 => "int16",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::UInt8 => "uint8",
            ValueKind::UInt16 => "uint16",
            ValueKind::UInt32 => "uint32",
            ValueKind::UInt64 => "uint64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::Nil => "nil",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
        }
    }

    /// Inverse of [`ValueKind::config_key`].
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.config_key() == key)
    }

    /// Flexible numerics take part in the promotion lattice.
    pub fn is_flexible(self) -> bool {
        matches!(
            self,
            ValueKind::SmallInt | ValueKind::BigInt | ValueKind::Float | ValueKind::BigFloat
        )
    }

    /// Strict numerics only combine with their own kind.
    pub fn is_strict(self) -> bool {
        matches!(
            self,
            ValueKind::Int8
                | ValueKind::Int16
                | ValueKind::Int32
                | ValueKind::Int64
                | ValueKind::UInt8
                | ValueKind::UInt16
                | ValueKind::UInt32
                | ValueKind::UInt64
                | ValueKind::Float32
                | ValueKind::Float64
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_flexible() || self.is_strict()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(BuiltinTypeNames.type_name(*self))
    }
}

/// Read-only type-descriptor lookup.
pub trait TypeNames: fmt::Debug + Send + Sync {
    /// Name shown in error messages for values of `kind`.
    fn type_name(&self, kind: ValueKind) -> &str;
}

/// Default class names of the runtime's standard library.
///
/// SmallInt and BigInt are two representations of the same language-level
/// class, so both report `Std::Int`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTypeNames;

impl TypeNames for BuiltinTypeNames {
    fn type_name(&self, kind: ValueKind) -> &str {
        match kind {
            ValueKind::SmallInt | ValueKind::BigInt => "Std::Int",
            ValueKind::Float => "Std::Float",
            ValueKind::BigFloat => "Std::BigFloat",
            ValueKind::Int8 => "Std::Int8",
            ValueKind::Int16 => "Std::Int16",
            ValueKind::Int32 => "Std::Int32",
            ValueKind::Int64 => "Std::Int64",
            ValueKind::UInt8 => "Std::UInt8",
            ValueKind::UInt16 => "Std::UInt16",
            ValueKind::UInt32 => "Std::UInt32",
            ValueKind::UInt64 => "Std::UInt64",
            ValueKind::Float32 => "Std::Float32",
            ValueKind::Float64 => "Std::Float64",
            ValueKind::Nil => "Std::Nil",
            ValueKind::Bool => "Std::Bool",
            ValueKind::String => "Std::String",
        }
    }
}

/// Builtin names with per-kind overrides (usually from `[type_names]` in
/// the tower configuration).
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    overrides: HashMap<ValueKind, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the name reported for `kind`.
    pub fn with_name(mut self, kind: ValueKind, name: impl Into<String>) -> Self {
        self.overrides.insert(kind, name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl TypeNames for TypeRegistry {
    fn type_name(&self, kind: ValueKind) -> &str {
        match self.overrides.get(&kind) {
            Some(name) => name,
            None => BuiltinTypeNames.type_name(kind),
        }
    }
}
