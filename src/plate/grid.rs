use crate::error::*;
use crate::util::*;

/// Read access to a square plate of temperatures.
/// Implemented by the owned `Grid` and by borrowed slices of one,
/// so the kernels do not care who owns the cells.
pub trait GridView: Sync {
    fn size(&self) -> usize;

    fn cells(&self) -> &[f32];

    #[track_caller]
    fn get(&self, coord: &Coord) -> f32 {
        self.cells()[coord_to_linear(coord, self.size())]
    }

    #[track_caller]
    fn row(&self, row: usize) -> &[f32] {
        let size = self.size();
        &self.cells()[row * size..(row + 1) * size]
    }
}

pub trait GridViewMut: GridView {
    fn cells_mut(&mut self) -> &mut [f32];

    #[track_caller]
    fn set(&mut self, coord: &Coord, value: f32) {
        let index = coord_to_linear(coord, self.size());
        self.cells_mut()[index] = value;
    }

    #[track_caller]
    fn row_mut(&mut self, row: usize) -> &mut [f32] {
        let size = self.size();
        &mut self.cells_mut()[row * size..(row + 1) * size]
    }

    fn fill(&mut self, value: f32) {
        self.cells_mut().fill(value);
    }
}

/// One generation of the plate, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<f32>,
}

impl Grid {
    /// Allocate a `size x size` grid filled with `value`.
    /// Reports allocation failure instead of aborting.
    pub fn try_new(size: usize, value: f32) -> Result<Self> {
        let n = checked_buffer_size(size).ok_or(Error::TooLarge { size })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(n)
            .map_err(|source| Error::Allocation { cells: n, source })?;
        cells.resize(n, value);
        Ok(Grid { size, cells })
    }

    pub fn as_slice(&self) -> GridSlice<'_> {
        GridSlice::new(self.size, &self.cells)
    }

    pub fn as_slice_mut(&mut self) -> GridSliceMut<'_> {
        GridSliceMut::new(self.size, &mut self.cells)
    }
}

impl GridView for Grid {
    fn size(&self) -> usize {
        self.size
    }

    fn cells(&self) -> &[f32] {
        &self.cells
    }
}

impl GridViewMut for Grid {
    fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }
}

/// Borrowed grid, used where the cells live behind a shared pointer.
#[derive(Copy, Clone, Debug)]
pub struct GridSlice<'a> {
    size: usize,
    cells: &'a [f32],
}

impl<'a> GridSlice<'a> {
    pub fn new(size: usize, cells: &'a [f32]) -> Self {
        debug_assert_eq!(cells.len(), buffer_size(size));
        GridSlice { size, cells }
    }
}

impl GridView for GridSlice<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn cells(&self) -> &[f32] {
        self.cells
    }
}

#[derive(Debug)]
pub struct GridSliceMut<'a> {
    size: usize,
    cells: &'a mut [f32],
}

impl<'a> GridSliceMut<'a> {
    pub fn new(size: usize, cells: &'a mut [f32]) -> Self {
        debug_assert_eq!(cells.len(), buffer_size(size));
        GridSliceMut { size, cells }
    }
}

impl GridView for GridSliceMut<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn cells(&self) -> &[f32] {
        self.cells
    }
}

impl GridViewMut for GridSliceMut<'_> {
    fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells[..]
    }
}
