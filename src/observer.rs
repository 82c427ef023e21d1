use crate::grid::Grid;

/// Receives the grid after every step of a search, and may ask the search to stop.
///
/// [observe](Self::observe) is called synchronously; the search resumes once it returns. The
/// grid is handed out read-only. [should_abort](Self::should_abort) is polled before each queue
/// pop, so an abort takes effect at the next step boundary.
pub trait SearchObserver {
    fn observe(&mut self, grid: &Grid);

    fn should_abort(&mut self) -> bool {
        false
    }
}

/// Any `FnMut(&Grid)` can observe a search that is never aborted.
impl<F: FnMut(&Grid)> SearchObserver for F {
    fn observe(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// Ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn observe(&mut self, _: &Grid) {}
}

/// Counts observed steps and aborts once `limit` of them have been seen.
#[derive(Clone, Copy, Debug)]
pub struct StepLimit {
    pub limit: usize,
    pub steps: usize,
}

impl StepLimit {
    pub fn new(limit: usize) -> StepLimit {
        StepLimit { limit, steps: 0 }
    }
}

impl SearchObserver for StepLimit {
    fn observe(&mut self, _: &Grid) {
        self.steps += 1;
    }
    fn should_abort(&mut self) -> bool {
        self.steps >= self.limit
    }
}
