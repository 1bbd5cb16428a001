//! Epoch-level passes over a batch source

use super::core::Trainer;
use crate::model::Model;
use crate::train::hook::Event;
use crate::train::state::{Mode, VAL_LOSS_SERIES};
use crate::train::Batch;
use crate::Result;

impl<M: Model> Trainer<M> {
    /// One pass over the batch source selected by the current mode.
    ///
    /// The global step counter advances only in training mode. After every
    /// batch the OR-ed `stop_epoch` signal is consulted; a true signal
    /// abandons the remaining batches of this pass immediately.
    ///
    /// Returns the mean loss over the processed batches (0.0 for an empty
    /// pass).
    pub(crate) fn epoch_pass(&mut self) -> Result<f32> {
        let training = self.state.mode == Mode::Training;
        self.model.set_mode(self.state.mode);

        let batches: Vec<Batch<M::Input, M::Target>> = if training {
            self.train_data.iter().collect()
        } else {
            self.val_data.iter().collect()
        };

        let mut total_loss = 0.0;
        let mut num_batches = 0usize;

        for batch in batches {
            if training {
                self.state.step += 1;
            }
            self.state.begin_batch(batch.input.clone(), batch.target.clone());
            self.hooks.fire(Event::BatchBegin, &mut self.state)?;

            let loss = self.batch_step(&batch, training)?;
            total_loss += loss;
            num_batches += 1;

            self.hooks.fire(Event::BatchEnd, &mut self.state)?;
            if self.hooks.fire(Event::StopEpoch, &mut self.state)? {
                log::debug!("stop_epoch signalled at step {}", self.state.step);
                break;
            }
        }

        Ok(if num_batches > 0 {
            total_loss / num_batches as f32
        } else {
            0.0
        })
    }

    /// The validation pass: shared epoch-pass logic under `Validating`
    /// mode, wrapped in `val_begin`/`val_end`. Must not mutate trainable
    /// parameters; the mode switch disables gradient tracking for its
    /// whole duration and the batch step performs no optimizer work.
    pub(crate) fn validation_pass(&mut self) -> Result<()> {
        self.state.mode = Mode::Validating;
        self.hooks.fire(Event::ValBegin, &mut self.state)?;

        let val_loss = self.epoch_pass()?;
        self.state.publish(VAL_LOSS_SERIES, val_loss);

        self.hooks.fire(Event::ValEnd, &mut self.state)?;
        Ok(())
    }
}
