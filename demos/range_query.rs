//! Find points inside axis-aligned boxes.
use kdsearch::prelude::*;

fn main() -> Result<(), BuildError> {
    let points = [[2, 1], [2, 2], [4, 2], [6, 2], [3, 3], [5, 4]];
    let queries = [([2, 0], [4, 4]), ([4, 2], [10, 5])];

    let mut index = KdSearch::new();
    index.prepare(&points)?;

    let mut output = Vec::new();
    for (min, max) in &queries {
        index.find(min, max, &mut output);
        println!("Points in {:?}..{:?}: {:?}", min, max, output);
        output.clear();
    }
    Ok(())
}
