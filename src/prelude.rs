//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use kdsearch::prelude::*;
//! ```

pub use crate::{BuildConfig, BuildError, KdSearch, KdSearchArray, PartitionStrategy, PivotRule};
