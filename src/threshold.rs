use crate::plate::*;
use crate::util::*;

/// Temperature used for the benchmark report.
pub const DEFAULT_THRESHOLD: f32 = 50.0;

/// Count interior cells at or above `threshold`. Edges are never counted.
pub fn count_at_or_above<G: GridView>(grid: &G, threshold: f32) -> usize {
    profiling::scope!("threshold::count_at_or_above");
    let size = grid.size();
    interior(size)
        .map(|r| {
            let row = grid.row(r);
            row[interior(size)].iter().filter(|v| **v >= threshold).count()
        })
        .sum()
}
