use crate::convergence::needs_work;
use crate::error::*;
use crate::plate::*;
use crate::solver::*;
use crate::stencil::relax;
use tracing::trace;

/// Reference loop on the calling thread.
#[derive(Copy, Clone, Debug, Default)]
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::Serial
    }

    fn run(
        &self,
        plate: &mut Plate,
        sources: &StaticSources,
        mask: &Mask,
        config: &SolverConfig,
    ) -> Result<LoopResult> {
        let mut iterations = 0;
        loop {
            let (current, next) = plate.split_mut();
            relax(current, next);

            sources.apply(plate.next_mut());
            plate.swap();
            iterations += 1;

            let keep_going = needs_work(plate.current(), mask, config.tolerance());
            trace!(iterations, keep_going, "iteration");
            if let Some(outcome) =
                loop_outcome(keep_going, iterations, config.max_iterations())
            {
                return Ok(LoopResult {
                    iterations,
                    outcome,
                });
            }
        }
    }
}
