//! Plate storage: the two temperature generations, the convergence mask,
//! and the static sources that pin cells to a fixed temperature.
//! All indexing is `(row, col)` into row-major buffers.

mod double_buffer;
mod grid;
mod init;
mod mask;
mod static_sources;

pub use double_buffer::*;
pub use grid::*;
pub use init::*;
pub use mask::*;
pub use static_sources::*;
