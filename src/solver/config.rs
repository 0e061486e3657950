use crate::error::*;
use crate::threshold::DEFAULT_THRESHOLD;
use crate::util::checked_buffer_size;
use clap::ValueEnum;

pub const DEFAULT_SIZE: usize = 1024;
pub const DEFAULT_TOLERANCE: f32 = 0.1;
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// How the iteration loop is spread over threads.
#[derive(Copy, Clone, Debug, ValueEnum, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Everything on the calling thread
    Serial,

    /// Calling thread drives the loop, rows are dispatched to a rayon pool
    Pool,

    /// One long-lived thread team kept in lockstep by barriers
    #[default]
    Team,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Serial => "serial",
            Strategy::Pool => "pool",
            Strategy::Team => "team",
        };
        write!(f, "{name}")
    }
}

/// Validated solve parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverConfig {
    size: usize,
    tolerance: f32,
    max_iterations: usize,
    threshold: f32,
    threads: usize,
    strategy: Strategy,
}

impl SolverConfig {
    pub fn new(size: usize, tolerance: f32, max_iterations: usize) -> Result<Self> {
        if size < 3 {
            return Err(Error::InvalidSize { size });
        }
        if checked_buffer_size(size).is_none() {
            return Err(Error::TooLarge { size });
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidTolerance { tolerance });
        }
        if max_iterations == 0 {
            return Err(Error::InvalidIterationCap);
        }
        Ok(SolverConfig {
            size,
            tolerance,
            max_iterations,
            threshold: DEFAULT_THRESHOLD,
            threads: default_threads(),
            strategy: Strategy::default(),
        })
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::InvalidThreads);
        }
        self.threads = threads;
        Ok(self)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Worker count actually used; the serial strategy always runs one.
    pub fn threads(&self) -> usize {
        match self.strategy {
            Strategy::Serial => 1,
            _ => self.threads,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            size: DEFAULT_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            threads: default_threads(),
            strategy: Strategy::default(),
        }
    }
}

pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
