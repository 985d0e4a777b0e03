//! Point and query-box helpers shared by the builder and the query engine.

/// Ordinate type accepted by the index.
///
/// Any `PartialOrd + Copy` type qualifies (`f64`, `i32`, `u16`, ...). Values are
/// expected to be totally ordered in practice: a `NaN` ordinate breaks the
/// kd-property and therefore query results.
pub trait Coordinate: PartialOrd + Copy {}

impl<T: PartialOrd + Copy> Coordinate for T {}

/// Returns `true` when `point` lies inside the closed box `[min, max]` on every axis.
///
/// This is the same containment test the query engine applies to every visited node,
/// exposed so callers can verify results or filter their own candidates.
///
/// # Example
/// ```
/// use kdsearch::within;
/// assert!(within(&[2, 1], &[2, 0], &[4, 4]));
/// assert!(!within(&[6, 2], &[2, 0], &[4, 4]));
/// ```
#[inline]
pub fn within<T: Coordinate, const K: usize>(point: &[T; K], min: &[T; K], max: &[T; K]) -> bool {
    for axis in 0..K {
        if min[axis] > point[axis] || point[axis] > max[axis] {
            return false;
        }
    }
    true
}

/// Returns `true` when some axis has `min > max`; such a box matches nothing.
#[inline]
pub(crate) fn is_inverted<T: Coordinate, const K: usize>(min: &[T; K], max: &[T; K]) -> bool {
    min.iter().zip(max.iter()).any(|(lo, hi)| lo > hi)
}
