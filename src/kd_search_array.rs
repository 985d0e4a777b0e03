//! Static kd-tree stored as an implicit binary tree in a flat array.
//!
//! The tree array has `L = M.next_power_of_two()` slots. Slot 0 is the root and
//! slot `i` has children `2i + 1` and `2i + 2`. A slot holds the index of a point
//! in the borrowed point slice, or `None` when no node lives there.
//!
//! Nodes at depth `d` split on axis `d % K`: every point in the left subtree has
//! an ordinate on that axis no greater than the node's, every point in the right
//! subtree one no smaller.

use std::ops::ControlFlow;

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::partition::{ConfiguredPartitioner, Partitioner};
use crate::point::{Coordinate, is_inverted, within};

/// Array-backed kd-tree over a borrowed slice of K-dimensional points.
///
/// Built once, then queried any number of times through `&self`. Queries are
/// safe to run from several threads at once; rebuilding means building a new value.
///
/// # Example
/// ```
/// use kdsearch::KdSearchArray;
///
/// let points = [[2, 1], [2, 2], [4, 2], [6, 2], [3, 3], [5, 4]];
/// let tree = KdSearchArray::build(&points).unwrap();
///
/// let mut found = Vec::new();
/// tree.find(&[2, 0], &[4, 4], &mut found);
/// found.sort_unstable();
/// assert_eq!(found, vec![0, 1, 2, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct KdSearchArray<'a, T, const K: usize> {
    /// Indexed points, owned by the caller
    points: &'a [[T; K]],
    /// Implicit binary tree of point indices
    slots: Box<[Option<usize>]>,
    /// Number of levels in the tree
    height: usize,
}

impl<'a, T: Coordinate, const K: usize> KdSearchArray<'a, T, K> {
    /// Builds the tree with the default configuration (stable-sort partitioning).
    ///
    /// # Errors
    /// Returns [`BuildError`] if the tree array or the working buffer cannot be allocated.
    ///
    /// # Panics
    /// Panics if `points` is empty or `K == 0`.
    pub fn build(points: &'a [[T; K]]) -> Result<Self, BuildError> {
        Self::build_with(points, &BuildConfig::default())
    }

    /// Builds the tree using the partition strategy named by `config`.
    ///
    /// # Errors
    /// Returns [`BuildError`] if the tree array or the working buffer cannot be allocated.
    ///
    /// # Panics
    /// Panics if `points` is empty or `K == 0`.
    pub fn build_with(points: &'a [[T; K]], config: &BuildConfig) -> Result<Self, BuildError> {
        tracing::debug!(
            strategy = %config.get_strategy(),
            seed = ?config.get_seed(),
            "selecting partitioner"
        );
        let mut partitioner = ConfiguredPartitioner::new(config.get_strategy(), config.get_seed());
        Self::build_using(points, &mut partitioner)
    }

    /// Builds the tree with a caller-supplied partitioner.
    ///
    /// # Errors
    /// Returns [`BuildError`] if the tree array or the working buffer cannot be allocated.
    ///
    /// # Panics
    /// Panics if `points` is empty or `K == 0`.
    pub fn build_using<P: Partitioner>(points: &'a [[T; K]], partitioner: &mut P) -> Result<Self, BuildError> {
        assert!(K > 0, "points must have at least one dimension");
        assert!(!points.is_empty(), "cannot build an index over zero points");

        let num_points = points.len();
        let capacity = num_points
            .checked_next_power_of_two()
            .ok_or(BuildError::CapacityOverflow { points: num_points })?;
        tracing::debug!(points = num_points, slots = capacity, dims = K, "building kd search array");

        let mut slots: Vec<Option<usize>> = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| BuildError::Allocation { what: "tree array", requested: capacity, source })?;
        slots.resize(capacity, None);

        // Working buffer, released when this function returns
        let mut indices: Vec<usize> = Vec::new();
        indices
            .try_reserve_exact(num_points)
            .map_err(|source| BuildError::Allocation { what: "index buffer", requested: num_points, source })?;
        indices.extend(0..num_points);

        let mut builder = Builder { points, slots: &mut slots, partitioner, height: 0 };
        builder.place(&mut indices, 0, 0);
        let height = builder.height;

        tracing::trace!(height, "kd search array built");
        Ok(Self { points, slots: slots.into_boxed_slice(), height })
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a built tree indexes at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Length of the tree array, the smallest power of two >= [`len`](Self::len).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of levels from the root to the deepest node.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only view of the tree array.
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// The indexed points.
    pub fn points(&self) -> &'a [[T; K]] {
        self.points
    }

    /// Appends to `results` the index of every point inside the closed box `[min, max]`.
    ///
    /// Results are appended (the vector is not cleared first), each matching index
    /// exactly once, in traversal order.
    pub fn find(&self, min: &[T; K], max: &[T; K], results: &mut Vec<usize>) {
        if is_inverted(min, max) {
            return;
        }
        self.find_from(min, max, results, 0, 0);
    }

    /// Range search restricted to the subtree rooted at slot `index`, which sits at `depth`.
    ///
    /// [`find`](Self::find) is `find_from(min, max, results, 0, 0)`. A slot past the
    /// end of the array or holding no node contributes nothing. `depth` must be the
    /// depth of `index` (`floor(log2(index + 1))`), otherwise pruning uses the wrong axis.
    ///
    /// # Panics
    /// In debug builds, panics if `depth` does not match an in-range `index`.
    pub fn find_from(&self, min: &[T; K], max: &[T; K], results: &mut Vec<usize>, index: usize, depth: usize) {
        debug_assert!(
            index >= self.slots.len() || depth == depth_of(index),
            "slot {index} does not sit at depth {depth}"
        );
        let _ = self.visit(min, max, index, depth, &mut |x| {
            results.push(x);
            ControlFlow::Continue(())
        });
    }

    /// Like [`find`](Self::find), but stops once `k` indices have been appended.
    pub fn find_k(&self, min: &[T; K], max: &[T; K], k: usize, results: &mut Vec<usize>) {
        if k == 0 || is_inverted(min, max) {
            return;
        }
        let mut remaining = k;
        let _ = self.visit(min, max, 0, 0, &mut |x| {
            results.push(x);
            remaining -= 1;
            if remaining == 0 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
    }

    /// Range search returning a fresh vector.
    pub fn query(&self, min: &[T; K], max: &[T; K]) -> Vec<usize> {
        let mut results = Vec::new();
        self.find(min, max, &mut results);
        results
    }

    /// Number of points inside `[min, max]`.
    pub fn count(&self, min: &[T; K], max: &[T; K]) -> usize {
        if is_inverted(min, max) {
            return 0;
        }
        let mut total = 0;
        let _ = self.visit(min, max, 0, 0, &mut |_| {
            total += 1;
            ControlFlow::Continue(())
        });
        total
    }

    /// Appends the index of every point equal to `point` on all axes.
    pub fn find_point(&self, point: &[T; K], results: &mut Vec<usize>) {
        self.find(point, point, results);
    }

    /// Pruned traversal shared by all queries. `report` may stop the walk early.
    fn visit<F>(&self, min: &[T; K], max: &[T; K], index: usize, depth: usize, report: &mut F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        let Some(&Some(x)) = self.slots.get(index) else {
            return ControlFlow::Continue(());
        };
        debug_assert!(x < self.points.len(), "slot {index} refers to missing point {x}");
        let point = &self.points[x];

        if within(point, min, max) {
            report(x)?;
        }

        let axis = depth % K;
        if min[axis] <= point[axis] {
            self.visit(min, max, 2 * index + 1, depth + 1, report)?;
        }
        if point[axis] <= max[axis] {
            self.visit(min, max, 2 * index + 2, depth + 1, report)?;
        }
        ControlFlow::Continue(())
    }
}

/// Depth of `slot` in the implicit tree: the root is at 0, slots 1 and 2 at 1, and so on.
#[inline]
pub(crate) fn depth_of(slot: usize) -> usize {
    (usize::BITS - 1 - (slot + 1).leading_zeros()) as usize
}

/// Recursive construction state.
struct Builder<'b, 'a, T, P, const K: usize> {
    points: &'a [[T; K]],
    slots: &'b mut [Option<usize>],
    partitioner: &'b mut P,
    height: usize,
}

impl<T: Coordinate, P: Partitioner, const K: usize> Builder<'_, '_, T, P, K> {
    /// Commits the median of `indices` to `slot` and recurses into both halves.
    fn place(&mut self, indices: &mut [usize], slot: usize, depth: usize) {
        debug_assert!(!indices.is_empty(), "empty range reached the builder");
        debug_assert!(slot < self.slots.len(), "slot {slot} outside tree array of {}", self.slots.len());

        let median = if indices.len() == 1 {
            0
        } else {
            self.partitioner.partition(self.points, indices, depth % K)
        };
        self.slots[slot] = Some(indices[median]);
        self.height = self.height.max(depth + 1);

        let (left, rest) = indices.split_at_mut(median);
        let right = &mut rest[1..];
        if !left.is_empty() {
            self.place(left, 2 * slot + 1, depth + 1);
        }
        if !right.is_empty() {
            self.place(right, 2 * slot + 2, depth + 1);
        }
    }
}
