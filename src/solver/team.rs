use crate::convergence::row_needs_work;
use crate::error::*;
use crate::plate::*;
use crate::solver::*;
use crate::stencil::relax_row;
use crate::util::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;
use sync_ptr::SyncMutPtr;
use tracing::{debug, trace};

/// A fixed team of threads that lives for the whole solve.
/// The team is a rayon pool of exactly `threads` workers; every worker
/// exists before anyone waits on a barrier.
/// Rows are claimed from a shared cursor, so any worker may take any row.
/// Each iteration:
///   relax -> barrier -> leader only: pin, swap, count, clear flag
///   -> barrier -> convergence test (OR into a flag) -> barrier
/// The last barrier lets every worker read the same flag before deciding
/// whether to go around again.
#[derive(Copy, Clone, Debug)]
pub struct TeamExecutor {
    threads: usize,
}

impl TeamExecutor {
    pub fn new(threads: usize) -> Self {
        TeamExecutor {
            threads: threads.max(1),
        }
    }
}

/// Both generations as raw pointers so the team can read one
/// while writing disjoint rows of the other.
struct SharedPlate<'a> {
    buffers: [SyncMutPtr<f32>; 2],
    size: usize,
    _plate: PhantomData<&'a mut Plate>,
}

impl<'a> SharedPlate<'a> {
    fn new(plate: &'a mut Plate) -> Self {
        let size = plate.size();
        let [a, b] = plate.buffers_mut();
        let buffers = unsafe {
            [
                SyncMutPtr::new(a.cells_mut().as_mut_ptr()),
                SyncMutPtr::new(b.cells_mut().as_mut_ptr()),
            ]
        };
        SharedPlate {
            buffers,
            size,
            _plate: PhantomData,
        }
    }

    /// # Safety
    /// Nobody may write generation `g` while the returned view is alive.
    unsafe fn grid(&self, g: usize) -> GridSlice<'_> {
        let cells = std::slice::from_raw_parts(
            self.buffers[g].inner() as *const f32,
            buffer_size(self.size),
        );
        GridSlice::new(self.size, cells)
    }

    /// # Safety
    /// The caller must hold an exclusive claim on `row` of generation `g`.
    #[allow(clippy::mut_from_ref)]
    unsafe fn row_mut(&self, g: usize, row: usize) -> &mut [f32] {
        debug_assert!(row < self.size);
        std::slice::from_raw_parts_mut(self.buffers[g].inner().add(row * self.size), self.size)
    }

    /// # Safety
    /// The caller must be the only thread touching generation `g`.
    unsafe fn grid_mut(&self, g: usize) -> GridSliceMut<'_> {
        let cells =
            std::slice::from_raw_parts_mut(self.buffers[g].inner(), buffer_size(self.size));
        GridSliceMut::new(self.size, cells)
    }
}

/// Everything the team shares besides the cells.
/// Only the barrier leader writes `generation`, `iterations`
/// and the cursors; `keep_going` is also set during the OR reduction.
struct TeamState {
    barrier: Barrier,
    generation: AtomicUsize,
    iterations: AtomicUsize,
    keep_going: AtomicBool,
    relax_cursor: AtomicUsize,
    check_cursor: AtomicUsize,
}

impl TeamState {
    fn new(threads: usize, generation: usize) -> Self {
        TeamState {
            barrier: Barrier::new(threads),
            generation: AtomicUsize::new(generation),
            iterations: AtomicUsize::new(0),
            keep_going: AtomicBool::new(true),
            relax_cursor: AtomicUsize::new(1),
            check_cursor: AtomicUsize::new(1),
        }
    }
}

/// Take the next unclaimed interior row, if any are left.
fn claim(cursor: &AtomicUsize, size: usize) -> Option<usize> {
    let row = cursor.fetch_add(1, Ordering::Relaxed);
    (row < size - 1).then_some(row)
}

struct Worker<'a> {
    shared: &'a SharedPlate<'a>,
    state: &'a TeamState,
    sources: &'a StaticSources,
    mask: &'a Mask,
    tolerance: f32,
    max_iterations: usize,
}

impl Worker<'_> {
    fn run(&self) {
        let size = self.shared.size;
        let state = self.state;
        loop {
            let generation = state.generation.load(Ordering::Relaxed);
            let next_generation = 1 - generation;

            {
                profiling::scope!("team: relax");
                // SAFETY: during this phase only rows of `next_generation`
                // are written, each by the one worker that claimed it.
                let current = unsafe { self.shared.grid(generation) };
                while let Some(row) = claim(&state.relax_cursor, size) {
                    let out = unsafe { self.shared.row_mut(next_generation, row) };
                    relax_row(&current, row, out);
                }
            }

            if state.barrier.wait().is_leader() {
                profiling::scope!("team: single worker phase");
                // SAFETY: every other worker is parked on the next barrier.
                let mut next = unsafe { self.shared.grid_mut(next_generation) };
                self.sources.apply(&mut next);
                state.generation.store(next_generation, Ordering::Relaxed);
                let iterations = state.iterations.load(Ordering::Relaxed);
                state.iterations.store(iterations + 1, Ordering::Relaxed);
                state.keep_going.store(false, Ordering::Relaxed);
                state.relax_cursor.store(1, Ordering::Relaxed);
                state.check_cursor.store(1, Ordering::Relaxed);
            }
            state.barrier.wait();

            {
                profiling::scope!("team: convergence");
                // SAFETY: nothing is written during the convergence test.
                let current = unsafe { self.shared.grid(next_generation) };
                while let Some(row) = claim(&state.check_cursor, size) {
                    if state.keep_going.load(Ordering::Relaxed) {
                        break;
                    }
                    if row_needs_work(&current, self.mask, row, self.tolerance) {
                        state.keep_going.store(true, Ordering::Relaxed);
                    }
                }
            }
            state.barrier.wait();

            let keep_going = state.keep_going.load(Ordering::Relaxed);
            let iterations = state.iterations.load(Ordering::Relaxed);
            if loop_outcome(keep_going, iterations, self.max_iterations).is_some() {
                return;
            }
        }
    }
}

impl TeamExecutor {
    fn build_pool(threads: usize) -> std::result::Result<ThreadPool, ThreadPoolBuildError> {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("hotplate_team_{}", i))
            .build()
    }

    fn run_with<F>(
        &self,
        build_pool: F,
        plate: &mut Plate,
        sources: &StaticSources,
        mask: &Mask,
        config: &SolverConfig,
    ) -> Result<LoopResult>
    where
        F: FnOnce(usize) -> std::result::Result<ThreadPool, ThreadPoolBuildError>,
    {
        let pool = build_pool(self.threads)?;
        let start_generation = plate.generation();
        let state = TeamState::new(self.threads, start_generation);
        {
            let shared = SharedPlate::new(plate);
            let worker = Worker {
                shared: &shared,
                state: &state,
                sources,
                mask,
                tolerance: config.tolerance(),
                max_iterations: config.max_iterations(),
            };
            debug!(threads = self.threads, "starting worker team");

            pool.broadcast(|_| worker.run());
        }

        if state.generation.load(Ordering::Relaxed) != start_generation {
            plate.swap();
        }
        let iterations = state.iterations.load(Ordering::Relaxed);
        let keep_going = state.keep_going.load(Ordering::Relaxed);
        trace!(iterations, keep_going, "worker team joined");

        let outcome = loop_outcome(keep_going, iterations, config.max_iterations())
            .unwrap_or(SolveOutcome::Capped);
        Ok(LoopResult {
            iterations,
            outcome,
        })
    }
}

impl Executor for TeamExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::Team
    }

    fn run(
        &self,
        plate: &mut Plate,
        sources: &StaticSources,
        mask: &Mask,
        config: &SolverConfig,
    ) -> Result<LoopResult> {
        self.run_with(Self::build_pool, plate, sources, mask, config)
    }
}
