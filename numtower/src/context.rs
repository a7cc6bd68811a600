//! Operation context: the read-only capabilities every operation consults.

use crate::config::TowerConfig;
use crate::types::TypeNames;
use crate::value::Value;

/// Names and tuning knobs passed to every arithmetic call.
///
/// Holds no mutable state, so one context can be shared by any number of
/// threads performing arithmetic concurrently.
#[derive(Debug, Clone, Copy)]
pub struct NumericContext<'a> {
    names: &'a dyn TypeNames,
    config: &'a TowerConfig,
}

impl<'a> NumericContext<'a> {
    /// Context that names types through `names`.
    pub fn new(names: &'a dyn TypeNames, config: &'a TowerConfig) -> Self {
        Self { names, config }
    }

    /// Context whose names come from the config's `[type_names]` registry.
    pub fn from_config(config: &'a TowerConfig) -> Self {
        Self {
            names: &config.type_names,
            config,
        }
    }

    pub fn config(&self) -> &TowerConfig {
        self.config
    }

    /// Type name of a value, for error messages.
    pub fn type_name(&self, value: &Value) -> &str {
        self.names.type_name(value.kind())
    }

    pub fn min_precision(&self) -> usize {
        self.config.min_bigfloat_precision
    }

    pub fn float_precision(&self) -> usize {
        self.config.float_precision
    }
}

impl Default for NumericContext<'static> {
    fn default() -> Self {
        static DEFAULT_CONFIG: std::sync::OnceLock<TowerConfig> = std::sync::OnceLock::new();
        NumericContext::from_config(DEFAULT_CONFIG.get_or_init(TowerConfig::default))
    }
}
