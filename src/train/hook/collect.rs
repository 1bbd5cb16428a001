//! Per-step series recorders

use super::traits::Hook;
use crate::model::Model;
use crate::train::state::{Mode, RunState};
use crate::Result;

/// Series key [`LrCollect`] publishes under
pub const LR_SERIES: &str = "lr";

/// Series key [`LossCollect`] publishes under
pub const LOSS_SERIES: &str = "loss";

/// Records the learning rate applied to each training step.
///
/// Captures at `batch_begin`, before a per-step scheduler advances, so the
/// recorded rate is the one the upcoming optimizer update actually uses.
#[derive(Clone, Debug, Default)]
pub struct LrCollect;

impl LrCollect {
    /// Create a new recorder
    pub fn new() -> Self {
        Self
    }
}

impl<M: Model> Hook<M> for LrCollect {
    fn name(&self) -> &'static str {
        "LrCollect"
    }

    fn on_batch_begin(&mut self, run: &mut RunState<M>) -> Result<bool> {
        if run.mode == Mode::Training {
            let lr = run.lr;
            run.publish(LR_SERIES, lr);
        }
        Ok(false)
    }
}

/// Records the loss of each training step at `batch_end`.
#[derive(Clone, Debug, Default)]
pub struct LossCollect;

impl LossCollect {
    /// Create a new recorder
    pub fn new() -> Self {
        Self
    }
}

impl<M: Model> Hook<M> for LossCollect {
    fn name(&self) -> &'static str {
        "LossCollect"
    }

    fn on_batch_end(&mut self, run: &mut RunState<M>) -> Result<bool> {
        if run.mode == Mode::Training {
            if let Some(loss) = run.loss {
                run.publish(LOSS_SERIES, loss);
            }
        }
        Ok(false)
    }
}
