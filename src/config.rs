//! Build configuration: which partition strategy the builder uses.

use std::fmt;

/// How the pivot is chosen by the selection-based partitioner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PivotRule {
    /// Middle element of the current range. Deterministic, but quadratic on
    /// adversarial inputs and on ranges full of equal values.
    #[default]
    Midpoint,
    /// Uniformly random element of the current range. Expected linear time.
    Random,
}

/// Strategy used to find the median of each sub-range while building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PartitionStrategy {
    /// Stable sort of the sub-range; ties keep their input order.
    #[default]
    Sort,
    /// Quickselect around a pivot picked by the given rule.
    Select(PivotRule),
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sort => f.write_str("sort"),
            Self::Select(PivotRule::Midpoint) => f.write_str("select/midpoint"),
            Self::Select(PivotRule::Random) => f.write_str("select/random"),
        }
    }
}

/// Options for [`KdSearchArray::build_with`](crate::KdSearchArray::build_with)
/// and [`KdSearch::with_config`](crate::KdSearch::with_config).
///
/// # Example
/// ```
/// use kdsearch::{BuildConfig, PartitionStrategy, PivotRule};
///
/// let config = BuildConfig::new()
///     .strategy(PartitionStrategy::Select(PivotRule::Random))
///     .seed(7);
/// assert_eq!(config.get_seed(), Some(7));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BuildConfig {
    strategy: PartitionStrategy,
    seed: Option<u64>,
}

impl BuildConfig {
    /// Default configuration: stable-sort partitioning, no fixed seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partition strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fixes the seed of the random pivot generator so builds are reproducible.
    /// Ignored by strategies that do not draw random numbers.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Configured partition strategy.
    pub fn get_strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// Configured seed, if any.
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }
}
