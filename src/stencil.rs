use crate::plate::*;
use crate::util::*;
use rayon::prelude::*;

/// Damped five point relaxation:
/// half the old value plus half the mean of the four neighbors.
#[inline(always)]
pub fn relaxed(up: f32, down: f32, left: f32, right: f32, centre: f32) -> f32 {
    (up + down + left + right + 4.0 * centre) / 8.0
}

/// Write the interior columns of `row` into `out`.
/// `out` is the full-width row of the next generation;
/// its first and last entries are not touched.
pub fn relax_row<G: GridView>(current: &G, row: usize, out: &mut [f32]) {
    let size = current.size();
    debug_assert!(row >= 1 && row < size - 1);
    debug_assert_eq!(out.len(), size);

    let up = current.row(row - 1);
    let centre = current.row(row);
    let down = current.row(row + 1);
    for c in interior(size) {
        out[c] = relaxed(up[c], down[c], centre[c - 1], centre[c + 1], centre[c]);
    }
}

/// One full pass over every interior row.
pub fn relax<G: GridView>(current: &G, next: &mut Grid) {
    profiling::scope!("stencil::relax");
    debug_assert_eq!(current.size(), next.size());
    for r in interior(current.size()) {
        relax_row(current, r, next.row_mut(r));
    }
}

/// Same as `relax` with rows handed out to the current rayon pool.
pub fn par_relax<G: GridView>(current: &G, next: &mut Grid) {
    profiling::scope!("stencil::par_relax");
    let size = current.size();
    debug_assert_eq!(size, next.size());
    next.cells_mut()[size..(size - 1) * size]
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(i, out)| {
            relax_row(current, i + 1, out);
        });
}
