//! Convergence test for the relaxation.
//!
//! A cell is settled when it is within `tolerance` of the plain mean of its
//! four neighbors. This differs from the weighted update in
//! `stencil::relaxed`; iteration counts depend on both staying as they are.

use crate::plate::*;
use crate::util::*;
use rayon::prelude::*;

#[inline(always)]
pub fn neighbor_mean(up: f32, down: f32, right: f32, left: f32) -> f32 {
    (up + down + right + left) / 4.0
}

/// True if any unmasked interior cell of `row` is `>= tolerance`
/// away from its neighbor mean. Stops at the first such cell.
pub fn row_needs_work<G: GridView>(
    current: &G,
    mask: &Mask,
    row: usize,
    tolerance: f32,
) -> bool {
    let size = current.size();
    debug_assert!(row >= 1 && row < size - 1);

    let up = current.row(row - 1);
    let centre = current.row(row);
    let down = current.row(row + 1);
    let masked = mask.row(row);
    interior(size).any(|c| {
        let mean = neighbor_mean(up[c], down[c], centre[c + 1], centre[c - 1]);
        (centre[c] - mean).abs() >= tolerance && !masked[c]
    })
}

pub fn needs_work<G: GridView>(current: &G, mask: &Mask, tolerance: f32) -> bool {
    profiling::scope!("convergence::needs_work");
    interior(current.size()).any(|r| row_needs_work(current, mask, r, tolerance))
}

/// OR reduction over rows on the current rayon pool.
pub fn par_needs_work<G: GridView>(current: &G, mask: &Mask, tolerance: f32) -> bool {
    profiling::scope!("convergence::par_needs_work");
    interior(current.size())
        .into_par_iter()
        .any(|r| row_needs_work(current, mask, r, tolerance))
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn settled_plate(size: usize) -> Grid {
        Grid::try_new(size, 20.0).unwrap()
    }

    #[test]
    fn uniform_plate_is_settled() {
        let grid = settled_plate(8);
        let mask = Mask::try_new(8).unwrap();
        assert!(!needs_work(&grid, &mask, 0.1));
        assert!(!par_needs_work(&grid, &mask, 0.1));
    }

    #[test]
    fn single_hot_cell_needs_work() {
        let mut grid = settled_plate(8);
        grid.set(&vector![3, 4], 20.5);
        let mask = Mask::try_new(8).unwrap();
        assert!(needs_work(&grid, &mask, 0.1));
        assert!(par_needs_work(&grid, &mask, 0.1));
        assert!(row_needs_work(&grid, &mask, 3, 0.1));
        // neighbors see a mean shifted by 0.125
        assert!(row_needs_work(&grid, &mask, 2, 0.1));
        assert!(!row_needs_work(&grid, &mask, 1, 0.1));
        // difference of exactly 0.5 at the hot cell
        assert!(needs_work(&grid, &mask, 0.5));
        assert!(!needs_work(&grid, &mask, 0.51));
    }

    #[test]
    fn masked_cells_are_ignored() {
        let size = 6;
        let mut grid = settled_plate(size);
        grid.set(&vector![2, 2], 90.0);
        let mask = Mask::try_new(size)
            .unwrap()
            .with_marked(&[vector![2, 2], vector![1, 2], vector![3, 2], vector![2, 1], vector![2, 3]]);
        assert!(!needs_work(&grid, &mask, 0.1));
        assert!(!par_needs_work(&grid, &mask, 0.1));
    }

    #[test]
    fn boundary_is_not_tested() {
        let size = 5;
        let mut grid = settled_plate(size);
        grid.set(&vector![0, 0], 1000.0);
        grid.set(&vector![4, 4], -1000.0);
        let mask = Mask::try_new(size).unwrap();
        assert!(!needs_work(&grid, &mask, 0.1));
    }

    #[test]
    fn initial_small_plate_needs_work() {
        let size = 5;
        let sources = StaticSources::for_size(size);
        let plate = Plate::try_new(size, &sources).unwrap();
        let mask = sources.build_mask().unwrap();
        // (1, 1): |50 - (0 + 50 + 50 + 0) / 4| = 25
        assert!(row_needs_work(plate.current(), &mask, 1, 0.1));
        assert!(needs_work(plate.current(), &mask, 0.1));
    }
}
