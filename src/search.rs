//! Rebuildable index with an explicit "not prepared" state.

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::kd_search_array::KdSearchArray;
use crate::point::Coordinate;

/// Holder that is prepared from a point slice and then queried.
///
/// Every call to [`prepare`](Self::prepare) discards the previous tree before
/// building, so a failed rebuild leaves the holder unprepared rather than serving
/// stale data. Rebuilding takes `&mut self`, so it can never overlap a query.
///
/// # Example
/// ```
/// use kdsearch::KdSearch;
///
/// let points = [[2.0, 1.0], [2.0, 2.0], [4.0, 2.0], [6.0, 2.0], [3.0, 3.0], [5.0, 4.0]];
/// let mut index = KdSearch::new();
/// index.prepare(&points).unwrap();
///
/// let mut results = Vec::new();
/// index.find(&[4.0, 2.0], &[10.0, 5.0], &mut results);
/// results.sort_unstable();
/// assert_eq!(results, vec![2, 3, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct KdSearch<'a, T, const K: usize> {
    tree: Option<KdSearchArray<'a, T, K>>,
    config: BuildConfig,
}

impl<'a, T: Coordinate, const K: usize> KdSearch<'a, T, K> {
    /// Creates an unprepared index using the default build configuration.
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    /// Creates an unprepared index that builds with `config`.
    pub fn with_config(config: BuildConfig) -> Self {
        Self { tree: None, config }
    }

    /// Builds the index over `points`, replacing any previous tree.
    ///
    /// # Errors
    /// Returns [`BuildError`] when allocation fails; the index is then unprepared.
    ///
    /// # Panics
    /// Panics if `points` is empty or `K == 0`.
    pub fn prepare(&mut self, points: &'a [[T; K]]) -> Result<(), BuildError> {
        self.tree = None;
        match KdSearchArray::build_with(points, &self.config) {
            Ok(tree) => {
                self.tree = Some(tree);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "prepare failed, index left unprepared");
                Err(err)
            }
        }
    }

    /// Whether the last [`prepare`](Self::prepare) succeeded.
    pub fn is_prepared(&self) -> bool {
        self.tree.is_some()
    }

    /// The built tree, if prepared.
    pub fn tree(&self) -> Option<&KdSearchArray<'a, T, K>> {
        self.tree.as_ref()
    }

    /// Drops the current tree.
    pub fn clear(&mut self) {
        self.tree = None;
    }

    /// Build configuration used by [`prepare`](Self::prepare).
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Appends the index of every point inside `[min, max]` to `results`.
    ///
    /// # Panics
    /// Panics if the index has not been prepared.
    pub fn find(&self, min: &[T; K], max: &[T; K], results: &mut Vec<usize>) {
        self.prepared().find(min, max, results);
    }

    /// Number of indexed points, or 0 when unprepared.
    pub fn len(&self) -> usize {
        self.tree.as_ref().map_or(0, |tree| tree.len())
    }

    /// Whether no points are currently indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prepared(&self) -> &KdSearchArray<'a, T, K> {
        match &self.tree {
            Some(tree) => tree,
            None => panic!("KdSearch queried before a successful prepare"),
        }
    }
}

impl<T: Coordinate, const K: usize> Default for KdSearch<'_, T, K> {
    fn default() -> Self {
        Self::new()
    }
}
