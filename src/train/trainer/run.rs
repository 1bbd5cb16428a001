//! The multi-epoch run loop

use super::core::Trainer;
use super::result::RunSummary;
use crate::io::{FINAL_SLOT, ROLLING_SLOT};
use crate::model::Model;
use crate::train::hook::Event;
use crate::train::state::{Mode, RunState, TRAIN_LOSS_SERIES};
use crate::Result;
use std::time::Instant;

impl<M: Model> Trainer<M> {
    /// Run the training loop for `total_epochs` epochs.
    ///
    /// Per epoch: training pass, `epoch_end`, validation pass (unless
    /// skipped), epoch-granularity scheduler advance, rolling checkpoint,
    /// `stop_train` decision. The final checkpoint is written exactly once,
    /// at natural exhaustion or at the first `stop_train` signal.
    ///
    /// Any hook, computation, or checkpoint fault aborts the run
    /// immediately; nothing is retried.
    pub fn run(&mut self, total_epochs: usize) -> Result<RunSummary> {
        self.start_time = Some(Instant::now());
        self.best_loss = None;
        self.state = RunState::new(self.config.clone(), total_epochs, self.optimizer.lr());

        log::info!(
            "run '{}': {} epochs, lr {:.2e}",
            self.config.experiment,
            total_epochs,
            self.state.lr
        );
        self.hooks.fire(Event::TrainBegin, &mut self.state)?;

        let mut stopped_early = false;
        let mut final_loss = 0.0;

        for epoch in 1..=total_epochs {
            self.state.epoch = epoch;
            self.state.mode = Mode::Training;
            self.hooks.fire(Event::EpochBegin, &mut self.state)?;

            let train_loss = self.epoch_pass()?;
            final_loss = train_loss;
            self.state.publish(TRAIN_LOSS_SERIES, train_loss);
            if self.best_loss.is_none() || train_loss < self.best_loss.unwrap() {
                self.best_loss = Some(train_loss);
            }
            self.hooks.fire(Event::EpochEnd, &mut self.state)?;

            let skip = self.config.train_only || self.hooks.fire(Event::SkipVal, &mut self.state)?;
            if !skip {
                self.validation_pass()?;
            }

            if !self.scheduler.update_on_step() {
                self.scheduler.step();
                self.optimizer.set_lr(self.scheduler.lr());
                self.state.lr = self.optimizer.lr();
            }

            self.save_checkpoint(ROLLING_SLOT)?;

            if self.hooks.fire(Event::StopTrain, &mut self.state)? {
                log::info!("stop_train signalled at epoch {epoch}");
                stopped_early = true;
                break;
            }
        }

        self.hooks.fire(Event::TrainEnd, &mut self.state)?;
        self.save_checkpoint(FINAL_SLOT)?;

        let summary = self.summary(final_loss, stopped_early);
        log::info!(
            "run '{}' finished: {} epochs, {} steps, final loss {:.4}",
            self.config.experiment,
            summary.epochs_completed,
            summary.global_steps,
            summary.final_loss
        );
        Ok(summary)
    }

    fn summary(&self, final_loss: f32, stopped_early: bool) -> RunSummary {
        RunSummary {
            epochs_completed: self.state.epoch,
            global_steps: self.state.step,
            final_loss,
            best_loss: self.best_loss.unwrap_or(final_loss),
            stopped_early,
            elapsed_secs: self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64()),
        }
    }
}
