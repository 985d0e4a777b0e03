//! Share one built index across threads.
//!
//! Queries only need `&self`, so the tree can be wrapped in an `Arc` and queried
//! concurrently. To rebuild, build a new tree and swap the `Arc`.

use kdsearch::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() -> Result<(), BuildError> {
    let num_items = 200_000;
    let num_threads = 8;
    let num_queries = 1_000;

    let mut rng = rand::rngs::StdRng::seed_from_u64(95756739);
    // Leaked so the borrowing tree is 'static and can move into threads
    let points: &'static [[f64; 3]] = Vec::leak(
        (0..num_items)
            .map(|_| {
                [
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                ]
            })
            .collect(),
    );
    let config = BuildConfig::new().strategy(PartitionStrategy::Select(PivotRule::Random));
    let tree = Arc::new(KdSearchArray::build_with(points, &config)?);

    let queries: Arc<Vec<([f64; 3], [f64; 3])>> = Arc::new(
        (0..num_queries)
            .map(|_| {
                let min = [
                    rng.random_range(0.0..90.0),
                    rng.random_range(0.0..90.0),
                    rng.random_range(0.0..90.0),
                ];
                (min, [min[0] + 10.0, min[1] + 10.0, min[2] + 10.0])
            })
            .collect(),
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let tree = Arc::clone(&tree);
            let queries = Arc::clone(&queries);
            thread::spawn(move || {
                let mut results = Vec::new();
                let mut found = 0;
                for (min, max) in queries.iter() {
                    results.clear();
                    tree.find(min, max, &mut results);
                    found += results.len();
                }
                found
            })
        })
        .collect();

    let mut total = 0;
    for handle in handles {
        match handle.join() {
            Ok(found) => total += found,
            Err(_) => eprintln!("query thread panicked"),
        }
    }
    let elapsed = start.elapsed();
    println!(
        "{} queries on {} threads: {:.2}ms, {} points found",
        num_threads * num_queries,
        num_threads,
        elapsed.as_secs_f64() * 1000.0,
        total
    );
    Ok(())
}
