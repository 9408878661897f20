//! Equality and scheduling policies
//!
//! Both enums are plain data so they can travel through configuration
//! (serde, environment text via `FromStr`) and structured log fields.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Policy controlling how two `Null` or two `EmptyContainer` leaves compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityStrategy {
    /// Always equal regardless of declared element type
    TypeIgnored,
    /// Equal if one declared type is assignable to/from the other, or they
    /// are primitive/boxed equivalents
    BetweenAssignableTypes,
    /// Equal only if declared types match exactly
    SameTypeOnly,
    /// An empty container compares equal to a null at the same position
    EmptyAsNull,
}

impl EqualityStrategy {
    pub const ALL: [EqualityStrategy; 4] = [
        EqualityStrategy::TypeIgnored,
        EqualityStrategy::BetweenAssignableTypes,
        EqualityStrategy::SameTypeOnly,
        EqualityStrategy::EmptyAsNull,
    ];

    /// Stable configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            EqualityStrategy::TypeIgnored => "type_ignored",
            EqualityStrategy::BetweenAssignableTypes => "between_assignable_types",
            EqualityStrategy::SameTypeOnly => "same_type_only",
            EqualityStrategy::EmptyAsNull => "empty_as_null",
        }
    }
}

impl std::fmt::Display for EqualityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EqualityStrategy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ParsePolicyError {
                policy: "equality strategy",
                input: s.to_string(),
            })
    }
}

/// How leaf evaluations and element conversions are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduling {
    /// In order on the calling thread, stopping at the first failure
    Serial,
    /// Fanned out across the worker pool
    Parallel,
    /// Parallel once the work size reaches the configured threshold
    #[default]
    Auto,
}

impl Scheduling {
    /// Decide whether `work` items should be processed in parallel
    pub fn is_parallel(&self, work: usize, threshold: usize) -> bool {
        match self {
            Scheduling::Serial => false,
            Scheduling::Parallel => true,
            Scheduling::Auto => work >= threshold,
        }
    }

    /// Stable configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheduling::Serial => "serial",
            Scheduling::Parallel => "parallel",
            Scheduling::Auto => "auto",
        }
    }
}

impl std::fmt::Display for Scheduling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheduling {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(Scheduling::Serial),
            "parallel" => Ok(Scheduling::Parallel),
            "auto" => Ok(Scheduling::Auto),
            _ => Err(ParsePolicyError {
                policy: "scheduling",
                input: s.to_string(),
            }),
        }
    }
}

/// Raised when policy text does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError {
    pub policy: &'static str,
    pub input: String,
}

impl std::fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.policy, self.input)
    }
}

impl std::error::Error for ParsePolicyError {}
