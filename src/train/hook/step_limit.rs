//! Bounded-iteration stop hook

use super::traits::Hook;
use crate::model::Model;
use crate::train::state::RunState;
use crate::Result;

/// Stops the run once the global step counter reaches a budget.
///
/// Signals both `stop_epoch` (so the remaining batches of the current pass
/// are abandoned immediately) and `stop_train` (so the run ends at the next
/// epoch boundary). The learning-rate sweep appends one of these bound to
/// its iteration count.
#[derive(Clone, Debug)]
pub struct StepLimit {
    limit: usize,
}

impl StepLimit {
    /// Stop after `limit` training steps
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    fn exhausted<M: Model>(&self, run: &RunState<M>) -> bool {
        run.step >= self.limit
    }
}

impl<M: Model> Hook<M> for StepLimit {
    fn name(&self) -> &'static str {
        "StepLimit"
    }

    fn on_stop_epoch(&mut self, run: &mut RunState<M>) -> Result<bool> {
        Ok(self.exhausted(run))
    }

    fn on_stop_train(&mut self, run: &mut RunState<M>) -> Result<bool> {
        Ok(self.exhausted(run))
    }
}
