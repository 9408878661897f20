use deepeq_core_types::EqualityStrategy;
use serde::{Deserialize, Serialize};

/// Strategies for the two special leaf kinds, set independently
///
/// A single [`EqualityStrategy`] converts into a policy that applies it to
/// both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EqualityPolicy {
    /// How two `Null` leaves compare
    pub null: EqualityStrategy,
    /// How two `EmptyContainer` leaves compare
    pub empty: EqualityStrategy,
}

impl EqualityPolicy {
    pub const fn new(null: EqualityStrategy, empty: EqualityStrategy) -> Self {
        Self { null, empty }
    }

    pub const fn uniform(strategy: EqualityStrategy) -> Self {
        Self::new(strategy, strategy)
    }

    /// Empty containers enumerate as nulls when either axis asks for it
    pub fn folds_empty_into_null(&self) -> bool {
        self.null == EqualityStrategy::EmptyAsNull || self.empty == EqualityStrategy::EmptyAsNull
    }
}

impl Default for EqualityPolicy {
    fn default() -> Self {
        Self::uniform(EqualityStrategy::BetweenAssignableTypes)
    }
}

impl From<EqualityStrategy> for EqualityPolicy {
    fn from(strategy: EqualityStrategy) -> Self {
        Self::uniform(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_strategy_applies_to_both_axes() {
        let policy = EqualityPolicy::from(EqualityStrategy::SameTypeOnly);
        assert_eq!(policy.null, EqualityStrategy::SameTypeOnly);
        assert_eq!(policy.empty, EqualityStrategy::SameTypeOnly);
        assert!(!policy.folds_empty_into_null());
    }

    #[test]
    fn test_either_axis_enables_folding() {
        let policy = EqualityPolicy::new(EqualityStrategy::EmptyAsNull, EqualityStrategy::SameTypeOnly);
        assert!(policy.folds_empty_into_null());
        let policy = EqualityPolicy::new(EqualityStrategy::TypeIgnored, EqualityStrategy::EmptyAsNull);
        assert!(policy.folds_empty_into_null());
    }
}
