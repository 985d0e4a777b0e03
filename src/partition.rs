//! Median partitioning of index ranges.
//!
//! A partitioner reorders a slice of point indices so that the entry at the
//! median position `len / 2` has no larger ordinate to its left and no smaller
//! ordinate to its right on the requested axis. The builder calls it once per
//! tree node.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{PartitionStrategy, PivotRule};
use crate::point::Coordinate;

/// Position of the median inside a range of `len` entries (the upper median).
#[inline]
pub(crate) fn median_of(len: usize) -> usize {
    len / 2
}

/// Reorders point indices around the median on one axis.
pub trait Partitioner {
    /// Partitions `indices` on axis `dim` and returns the median offset `indices.len() / 2`.
    ///
    /// After the call every entry before the returned offset has
    /// `points[i][dim] <=` the median's ordinate and every entry after has `>=`.
    ///
    /// # Panics
    /// May panic if `indices` is empty, `dim >= K`, or an index is out of range for `points`.
    fn partition<T: Coordinate, const K: usize>(
        &mut self,
        points: &[[T; K]],
        indices: &mut [usize],
        dim: usize,
    ) -> usize;
}

/// Stable sort of the whole range. O(n log n), deterministic, ties keep input order.
#[derive(Clone, Copy, Debug, Default)]
pub struct SortPartitioner;

impl Partitioner for SortPartitioner {
    fn partition<T: Coordinate, const K: usize>(
        &mut self,
        points: &[[T; K]],
        indices: &mut [usize],
        dim: usize,
    ) -> usize {
        debug_assert!(!indices.is_empty(), "cannot partition an empty range");
        indices.sort_by(|&a, &b| {
            points[a][dim]
                .partial_cmp(&points[b][dim])
                .unwrap_or(Ordering::Equal)
        });
        median_of(indices.len())
    }
}

#[derive(Clone, Debug)]
enum PivotSource {
    Midpoint,
    Random(StdRng),
}

/// Quickselect: partitions around a pivot and narrows onto the side holding the median.
///
/// Each pass splits the range into values below, equal to and above the pivot, and
/// stops as soon as the median falls among the equal ones, so long runs of equal
/// ordinates cost a single pass. Expected O(n) with a random pivot. Tie order inside
/// the range is unspecified.
#[derive(Clone, Debug)]
pub struct SelectPartitioner {
    pivot: PivotSource,
}

impl SelectPartitioner {
    /// Always pivots on the middle element of the current range.
    pub fn midpoint() -> Self {
        Self { pivot: PivotSource::Midpoint }
    }

    /// Random pivots from an OS-seeded generator.
    pub fn random() -> Self {
        Self { pivot: PivotSource::Random(StdRng::from_os_rng()) }
    }

    /// Random pivots from a generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { pivot: PivotSource::Random(StdRng::seed_from_u64(seed)) }
    }

    /// Builds the partitioner described by `rule`, seeding random pivots with `seed` when given.
    pub fn from_rule(rule: PivotRule, seed: Option<u64>) -> Self {
        match (rule, seed) {
            (PivotRule::Midpoint, _) => Self::midpoint(),
            (PivotRule::Random, Some(seed)) => Self::seeded(seed),
            (PivotRule::Random, None) => Self::random(),
        }
    }

    /// Picks a pivot position in the inclusive range `[lo, hi]`.
    #[inline]
    fn pick(&mut self, lo: usize, hi: usize) -> usize {
        match &mut self.pivot {
            PivotSource::Midpoint => lo + (hi - lo) / 2,
            PivotSource::Random(rng) => rng.random_range(lo..=hi),
        }
    }
}

impl Partitioner for SelectPartitioner {
    fn partition<T: Coordinate, const K: usize>(
        &mut self,
        points: &[[T; K]],
        indices: &mut [usize],
        dim: usize,
    ) -> usize {
        debug_assert!(!indices.is_empty(), "cannot partition an empty range");
        let target = median_of(indices.len());
        let mut lo = 0;
        let mut hi = indices.len() - 1;

        // Everything left of `lo` is <= everything in [lo, hi], which is <= everything right of `hi`.
        while lo < hi {
            indices.swap(lo, self.pick(lo, hi));
            let pivot = points[indices[lo]][dim];

            // Three-way split: [lo, less) < pivot, [less, greater) == pivot, [greater, hi] > pivot
            let mut less = lo;
            let mut i = lo;
            let mut greater = hi + 1;
            while i < greater {
                let value = points[indices[i]][dim];
                if value < pivot {
                    indices.swap(less, i);
                    less += 1;
                    i += 1;
                } else if value > pivot {
                    greater -= 1;
                    indices.swap(i, greater);
                } else {
                    i += 1;
                }
            }

            if target < less {
                hi = less - 1;
            } else if target >= greater {
                lo = greater;
            } else {
                break;
            }
        }
        target
    }
}

/// Partitioner selected at runtime from a [`PartitionStrategy`].
#[derive(Clone, Debug)]
pub(crate) enum ConfiguredPartitioner {
    Sort(SortPartitioner),
    Select(SelectPartitioner),
}

impl ConfiguredPartitioner {
    pub(crate) fn new(strategy: PartitionStrategy, seed: Option<u64>) -> Self {
        match strategy {
            PartitionStrategy::Sort => Self::Sort(SortPartitioner),
            PartitionStrategy::Select(rule) => Self::Select(SelectPartitioner::from_rule(rule, seed)),
        }
    }
}

impl Partitioner for ConfiguredPartitioner {
    #[inline]
    fn partition<T: Coordinate, const K: usize>(
        &mut self,
        points: &[[T; K]],
        indices: &mut [usize],
        dim: usize,
    ) -> usize {
        match self {
            Self::Sort(inner) => inner.partition(points, indices, dim),
            Self::Select(inner) => inner.partition(points, indices, dim),
        }
    }
}
