//! The single-batch step

use super::core::Trainer;
use crate::model::Model;
use crate::train::hook::Event;
use crate::train::Batch;
use crate::Result;

impl<M: Model> Trainer<M> {
    /// Run one batch through the model.
    ///
    /// Gradients are reset, the forward pass runs, `before_loss` fires,
    /// the loss is computed and recorded. Only in training mode does the
    /// backward/optimizer/scheduler tail run; a validation batch ends at
    /// the loss value.
    ///
    /// Returns the scalar loss for the batch.
    pub(crate) fn batch_step(
        &mut self,
        batch: &Batch<M::Input, M::Target>,
        training: bool,
    ) -> Result<f32> {
        self.optimizer.zero_grad();

        let output = self.model.forward(&batch.input)?;
        self.state.output = Some(output.clone());
        self.hooks.fire(Event::BeforeLoss, &mut self.state)?;

        let mut loss = self.loss_fn.forward(&output, &batch.target)?;
        let loss_value = loss.value();
        self.state.loss = Some(loss_value);

        if training {
            self.hooks.fire(Event::BeforeBackward, &mut self.state)?;
            loss.backward()?;
            self.optimizer.step()?;

            if self.scheduler.update_on_step() {
                self.scheduler.step();
                self.optimizer.set_lr(self.scheduler.lr());
                self.state.lr = self.optimizer.lr();
            }
        }

        Ok(loss_value)
    }
}
