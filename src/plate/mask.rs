use crate::error::*;
use crate::util::*;

/// Cells that the convergence test skips.
/// Fixed once built; the solve loop only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    size: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// All-false mask.
    pub fn try_new(size: usize) -> Result<Self> {
        let n = checked_buffer_size(size).ok_or(Error::TooLarge { size })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(n)
            .map_err(|source| Error::Allocation { cells: n, source })?;
        cells.resize(n, false);
        Ok(Mask { size, cells })
    }

    /// Mark `coords`, consuming the mask builder.
    pub(crate) fn with_marked<'a, I: IntoIterator<Item = &'a Coord>>(
        mut self,
        coords: I,
    ) -> Self {
        for c in coords {
            let index = coord_to_linear(c, self.size);
            self.cells[index] = true;
        }
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[track_caller]
    pub fn is_masked(&self, coord: &Coord) -> bool {
        self.cells[coord_to_linear(coord, self.size)]
    }

    #[track_caller]
    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|m| **m).count()
    }
}
