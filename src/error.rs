use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("plate size must be at least 3, got {size}")]
    InvalidSize { size: usize },

    #[error("tolerance must be finite and non-negative, got {tolerance}")]
    InvalidTolerance { tolerance: f32 },

    #[error("thread count must be at least 1")]
    InvalidThreads,

    #[error("iteration cap must be at least 1")]
    InvalidIterationCap,

    #[error("a {size}x{size} plate has more cells than fit in memory")]
    TooLarge { size: usize },

    #[error("failed to allocate {cells} cells")]
    Allocation {
        cells: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
