use crate::convergence::par_needs_work;
use crate::error::*;
use crate::plate::*;
use crate::solver::*;
use crate::stencil::par_relax;
use tracing::{debug, trace};

/// The calling thread owns the loop and does the single-worker
/// bookkeeping itself. Rows for relaxation and for the convergence test
/// go to a rayon pool built once per solve; the join at the end of each
/// parallel pass is the barrier.
#[derive(Copy, Clone, Debug)]
pub struct PoolExecutor {
    threads: usize,
}

impl PoolExecutor {
    pub fn new(threads: usize) -> Self {
        PoolExecutor {
            threads: threads.max(1),
        }
    }
}

impl Executor for PoolExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::Pool
    }

    fn run(
        &self,
        plate: &mut Plate,
        sources: &StaticSources,
        mask: &Mask,
        config: &SolverConfig,
    ) -> Result<LoopResult> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("hotplate_pool_{}", i))
            .build()?;
        debug!(threads = self.threads, "worker pool ready");

        let tolerance = config.tolerance();
        let max_iterations = config.max_iterations();
        let result = pool.install(|| {
            let mut iterations = 0;
            loop {
                {
                    let (current, next) = plate.split_mut();
                    par_relax(current, next);
                }

                {
                    profiling::scope!("pool: single worker phase");
                    sources.apply(plate.next_mut());
                    plate.swap();
                    iterations += 1;
                }

                let keep_going = par_needs_work(plate.current(), mask, tolerance);
                trace!(iterations, keep_going, "iteration");
                if let Some(outcome) = loop_outcome(keep_going, iterations, max_iterations) {
                    break LoopResult {
                        iterations,
                        outcome,
                    };
                }
            }
        });
        Ok(result)
    }
}
