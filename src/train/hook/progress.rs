//! Progress hook for logging training progress

use super::traits::Hook;
use crate::model::Model;
use crate::train::state::{Mode, RunState, TRAIN_LOSS_SERIES, VAL_LOSS_SERIES};
use crate::Result;

/// Logs run progress through the `log` facade.
#[derive(Clone, Debug)]
pub struct Progress {
    /// Log every N training steps
    log_interval: usize,
}

impl Progress {
    /// Create progress hook
    pub fn new(log_interval: usize) -> Self {
        Self { log_interval: log_interval.max(1) }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self { log_interval: 10 }
    }
}

impl<M: Model> Hook<M> for Progress {
    fn name(&self) -> &'static str {
        "Progress"
    }

    fn on_epoch_begin(&mut self, run: &mut RunState<M>) -> Result<bool> {
        log::info!(
            "epoch {}/{} starting (lr: {:.2e})",
            run.epoch,
            run.epochs_total,
            run.lr
        );
        Ok(false)
    }

    fn on_batch_end(&mut self, run: &mut RunState<M>) -> Result<bool> {
        if run.mode == Mode::Training && run.step % self.log_interval == 0 {
            log::debug!(
                "step {}: loss={:.4}",
                run.step,
                run.loss.unwrap_or(f32::NAN)
            );
        }
        Ok(false)
    }

    fn on_epoch_end(&mut self, run: &mut RunState<M>) -> Result<bool> {
        if let Some(loss) = run.latest(TRAIN_LOSS_SERIES) {
            log::info!("epoch {}/{}: loss={:.4}", run.epoch, run.epochs_total, loss);
        }
        Ok(false)
    }

    fn on_val_end(&mut self, run: &mut RunState<M>) -> Result<bool> {
        if let Some(loss) = run.latest(VAL_LOSS_SERIES) {
            log::info!("epoch {}: val_loss={:.4}", run.epoch, loss);
        }
        Ok(false)
    }
}
