//! Partitioner tests - postcondition checks for every strategy

#[cfg(test)]
mod tests {
    use crate::partition::{Partitioner, SelectPartitioner, SortPartitioner, median_of};
    use crate::{BuildConfig, KdSearchArray, PartitionStrategy, PivotRule};
    use rand::{Rng, SeedableRng};
    use std::cell::Cell;
    use std::cmp::Ordering;

    thread_local! {
        static COMPARISONS: Cell<usize> = const { Cell::new(0) };
    }

    /// Ordinate that counts every comparison made on it by the current thread.
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Counted(i32);

    impl PartialOrd for Counted {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            COMPARISONS.with(|c| c.set(c.get() + 1));
            self.0.partial_cmp(&other.0)
        }
    }

    fn comparisons_during(f: impl FnOnce()) -> usize {
        COMPARISONS.with(|c| c.set(0));
        f();
        COMPARISONS.with(Cell::get)
    }

    /// 3D points whose last axis is constant, as with planar data stored in 3D.
    fn flat_points(seed: u64, count: usize) -> Vec<[Counted; 3]> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| [Counted(rng.random_range(0..1_000_000)), Counted(rng.random_range(0..1_000_000)), Counted(0)])
            .collect()
    }

    /// Asserts the median postcondition for `indices` on `dim`.
    fn assert_partitioned<const K: usize>(points: &[[i32; K]], indices: &[usize], median: usize, dim: usize) {
        assert_eq!(median, indices.len() / 2, "median must be the upper median offset");
        let pivot = points[indices[median]][dim];
        for &i in &indices[..median] {
            assert!(points[i][dim] <= pivot, "left entry {} exceeds median {}", points[i][dim], pivot);
        }
        for &i in &indices[median + 1..] {
            assert!(points[i][dim] >= pivot, "right entry {} below median {}", points[i][dim], pivot);
        }
    }

    /// Asserts `indices` is still a permutation of `expected`.
    fn assert_permutation(indices: &[usize], expected: &[usize]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        let mut want = expected.to_vec();
        want.sort_unstable();
        assert_eq!(sorted, want, "partition must only reorder indices");
    }

    fn random_points(seed: u64, count: usize, max_value: i32) -> Vec<[i32; 3]> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                [
                    rng.random_range(0..max_value),
                    rng.random_range(0..max_value),
                    rng.random_range(0..max_value),
                ]
            })
            .collect()
    }

    fn check_partitioner<P: Partitioner>(partitioner: &mut P) {
        for (seed, count, max_value) in [(1, 1, 10), (2, 2, 10), (3, 3, 2), (4, 17, 1000), (5, 64, 4), (6, 257, 50)] {
            let points = random_points(seed, count, max_value);
            for dim in 0..3 {
                let original: Vec<usize> = (0..count).collect();
                let mut indices = original.clone();
                let median = partitioner.partition(&points, &mut indices, dim);
                assert_partitioned(&points, &indices, median, dim);
                assert_permutation(&indices, &original);
            }
        }
    }

    // ============================================================================
    // MEDIAN CONVENTION
    // ============================================================================

    #[test]
    fn test_median_of_is_upper_median() {
        assert_eq!(median_of(1), 0);
        assert_eq!(median_of(2), 1);
        assert_eq!(median_of(3), 1);
        assert_eq!(median_of(4), 2);
        assert_eq!(median_of(7), 3);
    }

    // ============================================================================
    // SORT PARTITIONER
    // ============================================================================

    #[test]
    fn test_sort_partitioner_postcondition() {
        check_partitioner(&mut SortPartitioner);
    }

    #[test]
    fn test_sort_partitioner_keeps_tie_order() {
        let points = [[5], [1], [5], [5], [0], [5]];
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let median = SortPartitioner.partition(&points, &mut indices, 0);
        assert_eq!(indices, vec![4, 1, 0, 2, 3, 5], "equal values must keep input order");
        assert_eq!(median, 3);
    }

    #[test]
    fn test_sort_partitioner_sub_range() {
        let points = [[9, 0], [3, 0], [7, 0], [1, 0], [5, 0]];
        let mut indices = vec![0, 1, 2, 3, 4];
        let median = SortPartitioner.partition(&points, &mut indices[1..4], 0);
        assert_eq!(median, 1);
        assert_eq!(indices, vec![0, 3, 1, 2, 4], "entries outside the sub-range stay put");
    }

    // ============================================================================
    // SELECT PARTITIONER
    // ============================================================================

    #[test]
    fn test_select_midpoint_postcondition() {
        check_partitioner(&mut SelectPartitioner::midpoint());
    }

    #[test]
    fn test_select_random_postcondition_many_seeds() {
        for seed in 0..50 {
            check_partitioner(&mut SelectPartitioner::seeded(seed));
        }
    }

    #[test]
    fn test_select_random_from_os_rng() {
        check_partitioner(&mut SelectPartitioner::random());
    }

    #[test]
    fn test_select_all_equal_values() {
        let points = vec![[3, 3]; 33];
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let median = SelectPartitioner::midpoint().partition(&points, &mut indices, 1);
        assert_eq!(median, 16);
        assert_partitioned(&points, &indices, median, 1);
    }

    #[test]
    fn test_select_constant_axis_is_single_pass() {
        let count = 10_000;
        let points = flat_points(21, count);
        for mut partitioner in [SelectPartitioner::midpoint(), SelectPartitioner::seeded(4)] {
            let mut indices: Vec<usize> = (0..count).collect();
            let mut median = 0;
            let used = comparisons_during(|| median = partitioner.partition(&points, &mut indices, 2));
            assert_eq!(median, count / 2);
            // One three-way sweep: at most two comparisons per entry
            assert!(used <= 2 * count, "{used} comparisons for {count} equal ordinates");
        }
    }

    #[test]
    fn test_select_build_with_constant_axis_stays_near_linearithmic() {
        let count = 8192;
        let points = flat_points(22, count);
        for rule in [PivotRule::Midpoint, PivotRule::Random] {
            let config = BuildConfig::new().strategy(PartitionStrategy::Select(rule)).seed(8);
            let used = comparisons_during(|| {
                let tree = KdSearchArray::build_with(&points, &config).unwrap();
                assert_eq!(tree.len(), count);
            });
            // n * log2(n) * 16 is ~1.7M; a quadratic sweep on the flat axis needs over 8M
            let bound = count * 13 * 16;
            assert!(used <= bound, "{used} comparisons building {count} points with {rule:?}, bound {bound}");
        }
    }

    #[test]
    fn test_select_descending_input() {
        let points: Vec<[i32; 1]> = (0..100).rev().map(|v| [v]).collect();
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let median = SelectPartitioner::midpoint().partition(&points, &mut indices, 0);
        assert_eq!(points[indices[median]][0], 50, "upper median of 0..100 is 50");
    }

    #[test]
    fn test_select_two_elements() {
        let points = [[8], [2]];
        let mut indices = vec![0, 1];
        let median = SelectPartitioner::midpoint().partition(&points, &mut indices, 0);
        assert_eq!(median, 1);
        assert_eq!(indices, vec![1, 0]);
    }

    #[test]
    fn test_select_from_rule() {
        let points = random_points(9, 40, 20);
        for rule in [PivotRule::Midpoint, PivotRule::Random] {
            let mut partitioner = SelectPartitioner::from_rule(rule, Some(3));
            let mut indices: Vec<usize> = (0..points.len()).collect();
            let median = partitioner.partition(&points, &mut indices, 2);
            assert_partitioned(&points, &indices, median, 2);
        }
    }

    #[test]
    fn test_sort_and_select_agree_on_median_value() {
        let points = random_points(11, 101, 30);
        for dim in 0..3 {
            let mut by_sort: Vec<usize> = (0..points.len()).collect();
            let mut by_select = by_sort.clone();
            let m1 = SortPartitioner.partition(&points, &mut by_sort, dim);
            let m2 = SelectPartitioner::seeded(5).partition(&points, &mut by_select, dim);
            assert_eq!(points[by_sort[m1]][dim], points[by_select[m2]][dim]);
        }
    }
}
