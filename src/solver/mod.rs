//! The relaxation loop.
//!
//! Every executor runs the same iteration:
//! relax into the next generation, then on exactly one worker pin the static
//! sources, swap generations, count the iteration and clear the flag, then
//! test the new current generation for convergence.
//! They differ only in how threads share that work,
//! and all of them produce bit-identical plates.

mod config;
mod pool;
mod serial;
mod team;

pub use config::*;
pub use pool::*;
pub use serial::*;
pub use team::*;

use crate::error::*;
use crate::plate::*;
use crate::threshold::count_at_or_above;
use std::time::{Duration, Instant};
use tracing::info;

/// How the loop ended. Neither is an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SolveOutcome {
    /// No unmasked interior cell was at or over tolerance.
    Converged,

    /// Hit the iteration cap while cells were still moving.
    Capped,
}

impl std::fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveOutcome::Converged => write!(f, "converged"),
            SolveOutcome::Capped => write!(f, "capped"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopResult {
    pub iterations: usize,
    pub outcome: SolveOutcome,
}

/// Decide whether the loop stops after an iteration.
/// Convergence wins over the cap when both happen on the same iteration.
pub fn loop_outcome(
    keep_going: bool,
    iterations: usize,
    max_iterations: usize,
) -> Option<SolveOutcome> {
    if !keep_going {
        Some(SolveOutcome::Converged)
    } else if iterations >= max_iterations {
        Some(SolveOutcome::Capped)
    } else {
        None
    }
}

/// Runs the iteration loop on an initialized plate.
pub trait Executor {
    fn strategy(&self) -> Strategy;

    fn run(
        &self,
        plate: &mut Plate,
        sources: &StaticSources,
        mask: &Mask,
        config: &SolverConfig,
    ) -> Result<LoopResult>;
}

pub fn executor_for(config: &SolverConfig) -> Box<dyn Executor> {
    match config.strategy() {
        Strategy::Serial => Box::new(SerialExecutor),
        Strategy::Pool => Box::new(PoolExecutor::new(config.threads())),
        Strategy::Team => Box::new(TeamExecutor::new(config.threads())),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    pub size: usize,
    pub iterations: usize,
    pub outcome: SolveOutcome,
    pub cells_at_threshold: usize,
    pub threshold: f32,
    pub threads: usize,
    pub strategy: Strategy,
    pub elapsed: Duration,
}

/// Solve and keep the final plate.
pub fn solve_plate(config: &SolverConfig) -> Result<(Plate, SolveReport)> {
    profiling::scope!("solver::solve");
    let start = Instant::now();
    info!(
        size = config.size(),
        tolerance = config.tolerance(),
        threads = config.threads(),
        strategy = %config.strategy(),
        "starting solve"
    );

    let sources = StaticSources::for_size(config.size());
    let mut plate = Plate::try_new(config.size(), &sources)?;
    let mask = sources.build_mask()?;

    let executor = executor_for(config);
    let result = executor.run(&mut plate, &sources, &mask, config)?;
    let cells_at_threshold = count_at_or_above(plate.current(), config.threshold());
    let elapsed = start.elapsed();

    info!(
        iterations = result.iterations,
        outcome = %result.outcome,
        cells_at_threshold,
        elapsed_s = elapsed.as_secs_f64(),
        "finished solve"
    );

    let report = SolveReport {
        size: config.size(),
        iterations: result.iterations,
        outcome: result.outcome,
        cells_at_threshold,
        threshold: config.threshold(),
        threads: config.threads(),
        strategy: executor.strategy(),
        elapsed,
    };
    Ok((plate, report))
}

pub fn solve(config: &SolverConfig) -> Result<SolveReport> {
    solve_plate(config).map(|(_, report)| report)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn outcome_test() {
        assert_eq!(loop_outcome(true, 3, 10), None);
        assert_eq!(loop_outcome(false, 3, 10), Some(SolveOutcome::Converged));
        assert_eq!(loop_outcome(true, 10, 10), Some(SolveOutcome::Capped));
        assert_eq!(loop_outcome(false, 10, 10), Some(SolveOutcome::Converged));
    }

    #[test]
    fn executor_matches_strategy() {
        for strategy in [Strategy::Serial, Strategy::Pool, Strategy::Team] {
            let config = SolverConfig::new(5, 0.1, 10)
                .unwrap()
                .with_strategy(strategy);
            assert_eq!(executor_for(&config).strategy(), strategy);
        }
    }

    #[test]
    fn tiny_plate_report() {
        let config = SolverConfig::new(3, 0.1, 500)
            .unwrap()
            .with_strategy(Strategy::Serial);
        let report = solve(&config).unwrap();
        // one interior cell: x' = (100 + 4x) / 8, so x_k = 25 + 25 / 2^k
        // and |x_k - 25| first drops under 0.1 at k = 8
        assert_eq!(report.outcome, SolveOutcome::Converged);
        assert_eq!(report.iterations, 8);
        assert_eq!(report.size, 3);
        assert_eq!(report.threads, 1);
        assert_eq!(report.cells_at_threshold, 0);
    }
}
