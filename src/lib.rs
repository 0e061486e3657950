pub mod build_info;
pub mod cli;
pub mod convergence;
pub mod error;
pub mod harness;
pub mod plate;
pub mod solver;
pub mod stencil;
pub mod threshold;
pub mod util;

pub use error::{Error, Result};
