pub mod indexing;

pub use indexing::*;
pub use nalgebra::vector;

/// Plate coordinate, stored as `(row, col)`.
pub type Coord = nalgebra::Vector2<usize>;

/// Rows that are neither the top nor the bottom edge.
#[inline]
pub fn interior(size: usize) -> std::ops::Range<usize> {
    1..size - 1
}

/// True when a coordinate sits on any of the four edges.
pub fn is_boundary(coord: &Coord, size: usize) -> bool {
    coord[0] == 0 || coord[1] == 0 || coord[0] == size - 1 || coord[1] == size - 1
}
