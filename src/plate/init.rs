use crate::plate::*;
use crate::util::*;

pub const EDGE_TEMPERATURE: f32 = 0.0;
pub const BOTTOM_TEMPERATURE: f32 = 100.0;
pub const INTERIOR_TEMPERATURE: f32 = 50.0;

/// Starting state of the plate:
/// left, right and top edges at 0, bottom edge at 100,
/// everything else at 50, then the static sources pinned.
/// The bottom edge is written last, so both bottom corners are 100.
pub fn initialize<G: GridViewMut>(grid: &mut G, sources: &StaticSources) {
    let size = grid.size();
    debug_assert!(size >= 3);

    grid.fill(INTERIOR_TEMPERATURE);
    for r in 0..size {
        grid.set(&vector![r, 0], EDGE_TEMPERATURE);
        grid.set(&vector![r, size - 1], EDGE_TEMPERATURE);
    }
    grid.row_mut(0).fill(EDGE_TEMPERATURE);
    grid.row_mut(size - 1).fill(BOTTOM_TEMPERATURE);

    sources.apply(grid);
}
