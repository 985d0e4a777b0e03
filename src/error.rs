//! Errors reported while building an index.

use std::collections::TryReserveError;

use thiserror::Error;

/// Reasons a build can fail. Contract violations (empty input, querying an
/// unprepared index) are not errors; they panic.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// An allocation for the tree array or the working index buffer failed.
    #[error("failed to allocate {what} ({requested} slots)")]
    Allocation {
        /// Which buffer could not be allocated.
        what: &'static str,
        /// Number of elements requested.
        requested: usize,
        /// Underlying allocator error.
        #[source]
        source: TryReserveError,
    },
    /// The point count has no power-of-two tree size representable in `usize`.
    #[error("{points} points do not fit a power-of-two tree array")]
    CapacityOverflow {
        /// Number of points passed to the build.
        points: usize,
    },
}
