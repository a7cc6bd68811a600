//! Tower configuration.
//!
//! Defaults match the language's numeric semantics; embedders may tune the
//! precision floor and shift limit through a TOML file or environment
//! variables:
//!
//! ```toml
//! min_bigfloat_precision = 64
//! float_precision = 53
//! max_shift_bits = 4294967296
//!
//! [type_names]
//! big_int = "Std::BigInt"
//! ```
//!
//! `NUMTOWER_CONFIG` points at such a file; `NUMTOWER_MIN_PRECISION` and
//! `NUMTOWER_FLOAT_PRECISION` override single fields.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{TypeRegistry, ValueKind};

/// Minimum precision, in bits, of a BigFloat produced from integer operands.
pub const DEFAULT_MIN_BIGFLOAT_PRECISION: usize = 64;

/// Precision, in bits, of a Float converted to BigFloat (IEEE double mantissa).
pub const DEFAULT_FLOAT_PRECISION: usize = 53;

/// Largest left shift, in bits, that will be materialized.
pub const DEFAULT_MAX_SHIFT_BITS: u64 = 1 << 32;

/// Configuration load failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("unknown value kind in [type_names]: {0}")]
    UnknownKind(String),

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    min_bigfloat_precision: Option<usize>,
    float_precision: Option<usize>,
    max_shift_bits: Option<u64>,
    type_names: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct TowerConfig {
    pub min_bigfloat_precision: usize,
    pub float_precision: usize,
    pub max_shift_bits: u64,
    pub type_names: TypeRegistry,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            min_bigfloat_precision: DEFAULT_MIN_BIGFLOAT_PRECISION,
            float_precision: DEFAULT_FLOAT_PRECISION,
            max_shift_bits: DEFAULT_MAX_SHIFT_BITS,
            type_names: TypeRegistry::new(),
        }
    }
}

impl TowerConfig {
    /// Parse a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let parsed: ConfigToml =
            toml::from_str(src).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut config = Self::default();
        if let Some(p) = parsed.min_bigfloat_precision {
            config.min_bigfloat_precision = validate_precision("min_bigfloat_precision", p)?;
        }
        if let Some(p) = parsed.float_precision {
            config.float_precision = validate_precision("float_precision", p)?;
        }
        if let Some(bits) = parsed.max_shift_bits {
            config.max_shift_bits = bits;
        }
        for (key, name) in parsed.type_names.unwrap_or_default() {
            let kind =
                ValueKind::from_config_key(&key).ok_or_else(|| ConfigError::UnknownKind(key))?;
            config.type_names = config.type_names.with_name(kind, name);
        }
        Ok(config)
    }

    /// Load a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&src)
    }

    /// Build the configuration from `NUMTOWER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var("NUMTOWER_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        if let Some(p) = precision_from_env("NUMTOWER_MIN_PRECISION")? {
            config.min_bigfloat_precision = p;
        }
        if let Some(p) = precision_from_env("NUMTOWER_FLOAT_PRECISION")? {
            config.float_precision = p;
        }
        Ok(config)
    }
}

fn validate_precision(field: &str, p: usize) -> Result<usize, ConfigError> {
    if p == 0 {
        return Err(ConfigError::Invalid(format!(
            "{} must be at least 1",
            field
        )));
    }
    Ok(p)
}

fn precision_from_env(var: &'static str) -> Result<Option<usize>, ConfigError> {
    let Ok(raw) = env::var(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(p) if p > 0 => Ok(Some(p)),
        _ => Err(ConfigError::InvalidEnv { var, value: raw }),
    }
}
