//! Early stopping hook to halt training when loss plateaus

use super::traits::Hook;
use crate::model::Model;
use crate::train::state::{RunState, TRAIN_LOSS_SERIES, VAL_LOSS_SERIES};
use crate::Result;

/// Early stopping hook to halt training when loss plateaus
///
/// Monitors the per-epoch loss series and signals `stop_train` when no
/// improvement is seen for `patience` epochs.
///
/// # Example
///
/// ```rust
/// use orquestar::hook::EarlyStopping;
///
/// // Stop if no improvement for 5 epochs, min improvement 0.001
/// let early_stop = EarlyStopping::new(5, 0.001);
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    /// Number of epochs to wait for improvement
    patience: usize,
    /// Minimum improvement to reset patience
    min_delta: f32,
    /// Best loss seen so far
    best_loss: f32,
    /// Epochs without improvement
    epochs_without_improvement: usize,
    /// Monitor validation loss instead of training loss
    monitor_val: bool,
}

impl EarlyStopping {
    /// Create new early stopping hook
    pub fn new(patience: usize, min_delta: f32) -> Self {
        Self {
            patience,
            min_delta,
            best_loss: f32::INFINITY,
            epochs_without_improvement: 0,
            monitor_val: false,
        }
    }

    /// Monitor validation loss (falls back to training loss when no
    /// validation pass ran this epoch)
    pub fn monitor_validation(mut self) -> Self {
        self.monitor_val = true;
        self
    }

    /// Reset internal state
    pub fn reset(&mut self) {
        self.best_loss = f32::INFINITY;
        self.epochs_without_improvement = 0;
    }

    fn check_improvement(&mut self, loss: f32) {
        if loss < self.best_loss - self.min_delta {
            self.best_loss = loss;
            self.epochs_without_improvement = 0;
        } else {
            self.epochs_without_improvement += 1;
        }
    }

    fn monitored_loss<M: Model>(&self, run: &RunState<M>) -> Option<f32> {
        if self.monitor_val {
            run.latest(VAL_LOSS_SERIES)
                .or_else(|| run.latest(TRAIN_LOSS_SERIES))
        } else {
            run.latest(TRAIN_LOSS_SERIES)
        }
    }
}

impl<M: Model> Hook<M> for EarlyStopping {
    fn name(&self) -> &'static str {
        "EarlyStopping"
    }

    fn on_stop_train(&mut self, run: &mut RunState<M>) -> Result<bool> {
        let Some(loss) = self.monitored_loss(run) else {
            return Ok(false);
        };
        self.check_improvement(loss);

        if self.epochs_without_improvement >= self.patience {
            log::info!(
                "early stopping: no improvement for {} epochs (best loss: {:.4})",
                self.patience,
                self.best_loss
            );
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
