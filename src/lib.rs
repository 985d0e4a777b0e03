//! # kdsearch - Static array kd-tree for orthogonal range queries
//!
//! A small library for axis-aligned range searches over a fixed set of
//! K-dimensional points. The index is built once from a slice of points and
//! then answers "which points lie inside this box?" any number of times.
//!
//! ## Features
//!
//! - **Implicit tree layout**: nodes live in one flat array, children of slot `i`
//!   at `2i + 1` and `2i + 2`; no per-node allocation
//! - **Any dimension, any ordinate type**: points are `[T; K]` for any `PartialOrd + Copy` `T`
//! - **Pluggable median partitioning**: stable sort, or quickselect with a midpoint or random pivot
//! - **Read-only queries**: a built tree is immutable and can be shared across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use kdsearch::prelude::*;
//!
//! // Points are owned by the caller; the index only borrows them
//! let points = [[2, 1], [2, 2], [4, 2], [6, 2], [3, 3], [5, 4]];
//!
//! // Build the index (required before querying)
//! let tree = KdSearchArray::build(&points).unwrap();
//!
//! // Query for points inside the box (2, 0) - (4, 4)
//! let mut results = Vec::new();
//! tree.find(&[2, 0], &[4, 4], &mut results);
//! results.sort_unstable();
//! assert_eq!(results, vec![0, 1, 2, 4]);
//!
//! // Results are appended, so clear the vector between queries
//! results.clear();
//! tree.find(&[100, 100], &[200, 200], &mut results);
//! assert!(results.is_empty());
//! ```
//!
//! ## How It Works
//!
//! Construction splits the points at the median of axis `depth % K`, stores the
//! median point in the current slot, and recurses into the two halves. The tree
//! array has `next_power_of_two(M)` slots. A query visits a node, reports it when it
//! lies inside the box, and descends into a child only when the node's split value
//! leaves room for matches on that side.
//!
//! The partition strategy is chosen with [`BuildConfig`]:
//!
//! ```rust
//! use kdsearch::prelude::*;
//!
//! let points: Vec<[f64; 3]> = (0..100).map(|i| [i as f64, (i % 7) as f64, (i % 3) as f64]).collect();
//! let config = BuildConfig::new()
//!     .strategy(PartitionStrategy::Select(PivotRule::Random))
//!     .seed(1);
//! let tree = KdSearchArray::build_with(&points, &config).unwrap();
//! assert_eq!(tree.count(&[10.0, 0.0, 0.0], &[19.0, 6.0, 2.0]), 10);
//! ```

pub mod config;
pub mod error;
pub mod kd_search_array;
pub mod partition;
pub mod point;
pub mod prelude;
pub mod search;

pub use config::{BuildConfig, PartitionStrategy, PivotRule};
pub use error::BuildError;
pub use kd_search_array::KdSearchArray;
pub use partition::{Partitioner, SelectPartitioner, SortPartitioner};
pub use point::{Coordinate, within};
pub use search::KdSearch;

mod partition_tests;
