//! Engine configuration
//!
//! Read once when an [`Engine`](crate::engine::Engine) is built and immutable
//! afterwards. Defaults match an unconfigured process; the environment (or
//! any serde source) may override them.

use deepeq_core_types::EqualityStrategy;
use serde::Deserialize;

use crate::errors::{DeepEqError, Result};

pub const ENV_EMPTY_ARRAY_AS_DEFAULT: &str = "DEEPEQ_EMPTY_ARRAY_AS_DEFAULT";
pub const ENV_PARALLEL_THRESHOLD: &str = "DEEPEQ_PARALLEL_THRESHOLD";
pub const ENV_NULL_EQUALITY: &str = "DEEPEQ_NULL_EQUALITY";
pub const ENV_EMPTY_EQUALITY: &str = "DEEPEQ_EMPTY_EQUALITY";

/// Leaf count at or above which auto scheduling goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Container types default to an empty instance instead of `None`
    pub empty_array_as_default: bool,
    pub parallel_threshold: usize,
    /// Default strategy for null leaves
    pub null_strategy: EqualityStrategy,
    /// Default strategy for empty-container leaves
    pub empty_strategy: EqualityStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            empty_array_as_default: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            null_strategy: EqualityStrategy::BetweenAssignableTypes,
            empty_strategy: EqualityStrategy::BetweenAssignableTypes,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DEEPEQ_EMPTY_ARRAY_AS_DEFAULT` (default: `false`)
    /// - `DEEPEQ_PARALLEL_THRESHOLD` (default: `100000`)
    /// - `DEEPEQ_NULL_EQUALITY` (default: `between_assignable_types`)
    /// - `DEEPEQ_EMPTY_EQUALITY` (default: `between_assignable_types`)
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first variable that fails to parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] over an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_EMPTY_ARRAY_AS_DEFAULT) {
            config.empty_array_as_default = parse_bool(ENV_EMPTY_ARRAY_AS_DEFAULT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL_THRESHOLD) {
            config.parallel_threshold = raw
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_PARALLEL_THRESHOLD, &raw))?;
        }
        if let Some(raw) = lookup(ENV_NULL_EQUALITY) {
            config.null_strategy = raw.parse().map_err(|_| invalid(ENV_NULL_EQUALITY, &raw))?;
        }
        if let Some(raw) = lookup(ENV_EMPTY_EQUALITY) {
            config.empty_strategy = raw.parse().map_err(|_| invalid(ENV_EMPTY_EQUALITY, &raw))?;
        }

        Ok(config)
    }

    pub fn with_empty_array_as_default(mut self, enabled: bool) -> Self {
        self.empty_array_as_default = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_null_strategy(mut self, strategy: EqualityStrategy) -> Self {
        self.null_strategy = strategy;
        self
    }

    pub fn with_empty_strategy(mut self, strategy: EqualityStrategy) -> Self {
        self.empty_strategy = strategy;
        self
    }
}

fn invalid(key: &str, raw: &str) -> DeepEqError {
    DeepEqError::InvalidConfig {
        key: key.to_string(),
        value: raw.to_string(),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.parallel_threshold, 100_000);
        assert!(!config.empty_array_as_default);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_EMPTY_ARRAY_AS_DEFAULT, "TRUE"),
            (ENV_PARALLEL_THRESHOLD, " 64 "),
            (ENV_NULL_EQUALITY, "type-ignored"),
            (ENV_EMPTY_EQUALITY, "SAME_TYPE_ONLY"),
        ]))
        .unwrap();

        assert!(config.empty_array_as_default);
        assert_eq!(config.parallel_threshold, 64);
        assert_eq!(config.null_strategy, EqualityStrategy::TypeIgnored);
        assert_eq!(config.empty_strategy, EqualityStrategy::SameTypeOnly);
    }

    #[test]
    fn test_invalid_value_names_the_key() {
        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_PARALLEL_THRESHOLD, "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            DeepEqError::InvalidConfig {
                key: ENV_PARALLEL_THRESHOLD.to_string(),
                value: "lots".to_string(),
            }
        );

        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_EMPTY_ARRAY_AS_DEFAULT, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, DeepEqError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::default()
            .with_parallel_threshold(1)
            .with_empty_array_as_default(true)
            .with_null_strategy(EqualityStrategy::SameTypeOnly)
            .with_empty_strategy(EqualityStrategy::EmptyAsNull);
        assert_eq!(config.parallel_threshold, 1);
        assert!(config.empty_array_as_default);
        assert_eq!(config.null_strategy, EqualityStrategy::SameTypeOnly);
        assert_eq!(config.empty_strategy, EqualityStrategy::EmptyAsNull);
    }
}
