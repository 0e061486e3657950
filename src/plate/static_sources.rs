use crate::error::*;
use crate::plate::*;
use crate::util::*;

/// Temperature held by every static source cell.
pub const SOURCE_TEMPERATURE: f32 = 100.0;

/// Plates at or below this size carry no static sources.
pub const SOURCE_MIN_EXCLUSIVE_SIZE: usize = 500;

/// Row of the hot segment and its last column (inclusive).
pub const SEGMENT_ROW: usize = 400;
pub const SEGMENT_LAST_COL: usize = 330;

/// The lone hot cell away from the segment.
pub const ISOLATED_CELL: (usize, usize) = (200, 500);

/// Cells pinned to `SOURCE_TEMPERATURE` after every iteration.
/// The same set doubles as the convergence mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticSources {
    size: usize,
    cells: Vec<Coord>,
}

impl StaticSources {
    pub fn for_size(size: usize) -> Self {
        let mut cells = Vec::new();
        if size > SOURCE_MIN_EXCLUSIVE_SIZE {
            cells.extend((0..=SEGMENT_LAST_COL).map(|col| vector![SEGMENT_ROW, col]));
            cells.push(vector![ISOLATED_CELL.0, ISOLATED_CELL.1]);
        }
        StaticSources { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Overwrite every source cell, whatever the stencil left there.
    pub fn apply<G: GridViewMut + ?Sized>(&self, grid: &mut G) {
        debug_assert_eq!(grid.size(), self.size);
        profiling::scope!("static_sources::apply");
        for c in &self.cells {
            grid.set(c, SOURCE_TEMPERATURE);
        }
    }

    pub fn build_mask(&self) -> Result<Mask> {
        Ok(Mask::try_new(self.size)?.with_marked(&self.cells))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn small_plates_have_no_sources() {
        for size in [3, 10, 100, 499, 500] {
            let sources = StaticSources::for_size(size);
            assert!(sources.is_empty());
            let mask = sources.build_mask().unwrap();
            assert_eq!(mask.count(), 0);

            let mut grid = Grid::try_new(size, 1.0).unwrap();
            sources.apply(&mut grid);
            assert!(grid.cells().iter().all(|v| *v == 1.0));
        }
    }

    #[test]
    fn large_plates_have_segment_and_cell() {
        for size in [501, 600, 1024] {
            let sources = StaticSources::for_size(size);
            assert_eq!(sources.len(), 331 + 1);

            let mask = sources.build_mask().unwrap();
            assert_eq!(mask.count(), 332);
            for col in 0..size {
                assert_eq!(mask.is_masked(&vector![SEGMENT_ROW, col]), col <= 330);
            }
            assert!(mask.is_masked(&vector![200, 500]));
            assert!(!mask.is_masked(&vector![200, 499]));
            assert!(!mask.is_masked(&vector![399, 0]));
        }
    }

    #[test]
    fn mask_matches_pinned_cells() {
        let size = 600;
        let sources = StaticSources::for_size(size);
        let mask = sources.build_mask().unwrap();
        let mut grid = Grid::try_new(size, 0.0).unwrap();
        sources.apply(&mut grid);
        for (i, v) in grid.cells().iter().enumerate() {
            let c = linear_to_coord(i, size);
            assert_eq!(*v == SOURCE_TEMPERATURE, mask.is_masked(&c));
        }
    }

    #[test]
    fn apply_is_idempotent() {
        let size = 512;
        let sources = StaticSources::for_size(size);
        let mut once = Grid::try_new(size, 3.0).unwrap();
        once.set(&vector![400, 10], -7.0);
        let mut twice = once.clone();

        sources.apply(&mut once);
        sources.apply(&mut twice);
        sources.apply(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(once.get(&vector![400, 10]), SOURCE_TEMPERATURE);
    }
}
