//! Engine
//!
//! Owns the configuration and the two process-wide caches. Hosts build one
//! with [`Engine::new`] and pass it by reference; [`Engine::global`] is an
//! init-once instance configured from the environment for callers that do
//! not manage their own.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::EngineConfig;
use crate::conversion::ConversionTable;
use crate::equality::EqualityPolicy;
use crate::errors::Result;
use crate::model::{TypeDesc, Value};
use crate::registry::OperatorRegistry;
use crate::traversal::{self, LeafPath};

pub struct Engine {
    config: EngineConfig,
    registry: Arc<OperatorRegistry>,
    conversions: ConversionTable,
}

static GLOBAL: OnceLock<Engine> = OnceLock::new();

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let registry = Arc::new(OperatorRegistry::new());
        let conversions = ConversionTable::new(Arc::clone(&registry), &config);
        tracing::debug!(
            parallel_threshold = config.parallel_threshold,
            empty_array_as_default = config.empty_array_as_default,
            null_strategy = %config.null_strategy,
            empty_strategy = %config.empty_strategy,
            "engine initialized"
        );
        Self {
            config,
            registry,
            conversions,
        }
    }

    /// Process-wide engine built from the environment on first use
    ///
    /// Invalid environment values are logged and replaced by defaults.
    pub fn global() -> &'static Engine {
        GLOBAL.get_or_init(|| {
            let config = EngineConfig::from_env().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid deepeq configuration, using defaults");
                EngineConfig::default()
            });
            Engine::new(config)
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Policy built from the configured null and empty strategies
    pub fn default_policy(&self) -> EqualityPolicy {
        EqualityPolicy::new(self.config.null_strategy, self.config.empty_strategy)
    }

    pub fn enumerate(&self, value: &Value) -> Vec<LeafPath> {
        traversal::enumerate(value)
    }

    pub fn convert(&self, value: &Value, to: &TypeDesc) -> Option<Value> {
        self.conversions.convert(value, to)
    }

    /// # Errors
    ///
    /// `Unconvertible` when no conversion applies to `value`.
    pub fn try_convert(&self, value: &Value, to: &TypeDesc) -> Result<Value> {
        self.conversions.try_convert(value, to)
    }

    /// Default for `ty`: an empty container when `empty_array_as_default` is
    /// set and `ty` is a container type, otherwise `None`
    pub fn default_value(&self, ty: &TypeDesc) -> Option<Value> {
        self.conversions.get_equivalence(ty).default_value().cloned()
    }

    /// Render a value, going through the array operators for arrays
    pub fn deep_to_string(&self, value: &Value) -> String {
        match value {
            Value::Array(array) => self.registry.array_operators(array).deep_to_string(array),
            other => other.to_string(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("cached_bundles", &self.registry.len())
            .finish_non_exhaustive()
    }
}
