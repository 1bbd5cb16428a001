//! Hook trait and lifecycle events
//!
//! A hook implements any subset of the lifecycle callbacks; every callback
//! has a default no-op implementation returning `Ok(false)`, so a hook only
//! spells out the events it cares about. Callbacks receive the shared
//! [`RunState`] by `&mut` reference and return a boolean control signal;
//! the engine consults the OR-ed signal for `stop_epoch`, `stop_train` and
//! `skip_val`, and ignores it for every other event.
//!
//! A callback error is fatal: dispatch stops, the run aborts, and the
//! error names the hook and the event (hook bugs are never masked).

use crate::model::Model;
use crate::train::state::RunState;
use crate::Result;
use std::fmt;

/// A named point in the run → epoch → batch timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    TrainBegin,
    EpochBegin,
    BatchBegin,
    BatchEnd,
    BeforeLoss,
    BeforeBackward,
    StopEpoch,
    EpochEnd,
    SkipVal,
    ValBegin,
    ValEnd,
    StopTrain,
    TrainEnd,
}

impl Event {
    /// All events, in timeline order
    pub const ALL: [Event; 13] = [
        Event::TrainBegin,
        Event::EpochBegin,
        Event::BatchBegin,
        Event::BatchEnd,
        Event::BeforeLoss,
        Event::BeforeBackward,
        Event::StopEpoch,
        Event::EpochEnd,
        Event::SkipVal,
        Event::ValBegin,
        Event::ValEnd,
        Event::StopTrain,
        Event::TrainEnd,
    ];

    /// The event's wire name
    pub fn name(&self) -> &'static str {
        match self {
            Event::TrainBegin => "train_begin",
            Event::EpochBegin => "epoch_begin",
            Event::BatchBegin => "batch_begin",
            Event::BatchEnd => "batch_end",
            Event::BeforeLoss => "before_loss",
            Event::BeforeBackward => "before_backward",
            Event::StopEpoch => "stop_epoch",
            Event::EpochEnd => "epoch_end",
            Event::SkipVal => "skip_val",
            Event::ValBegin => "val_begin",
            Event::ValEnd => "val_end",
            Event::StopTrain => "stop_train",
            Event::TrainEnd => "train_end",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for lifecycle hooks
///
/// Implement this trait to observe or redirect the training loop. All
/// methods default to a no-op returning `Ok(false)`.
pub trait Hook<M: Model>: Send {
    /// Hook name used in fault reports
    fn name(&self) -> &'static str {
        "Hook"
    }

    /// Called once before the first epoch
    fn on_train_begin(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called at the start of each epoch, before the training pass
    fn on_epoch_begin(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called before each batch step, after the batch snapshot is staged
    fn on_batch_begin(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called after each batch step
    fn on_batch_end(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called between the forward pass and the loss computation
    fn on_before_loss(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called between the loss computation and the backward pass
    /// (training mode only)
    fn on_before_backward(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Signal: abort the remaining batches of the current epoch pass
    fn on_stop_epoch(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called after each training epoch pass
    fn on_epoch_end(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Signal: skip this epoch's validation pass
    fn on_skip_val(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called before a validation pass
    fn on_val_begin(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called after a validation pass
    fn on_val_end(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Signal: stop the run after this epoch
    fn on_stop_train(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Called once when the run ends, naturally or early
    fn on_train_end(&mut self, _run: &mut RunState<M>) -> Result<bool> {
        Ok(false)
    }

    /// Dispatch one event to the matching callback
    fn dispatch(&mut self, event: Event, run: &mut RunState<M>) -> Result<bool> {
        match event {
            Event::TrainBegin => self.on_train_begin(run),
            Event::EpochBegin => self.on_epoch_begin(run),
            Event::BatchBegin => self.on_batch_begin(run),
            Event::BatchEnd => self.on_batch_end(run),
            Event::BeforeLoss => self.on_before_loss(run),
            Event::BeforeBackward => self.on_before_backward(run),
            Event::StopEpoch => self.on_stop_epoch(run),
            Event::EpochEnd => self.on_epoch_end(run),
            Event::SkipVal => self.on_skip_val(run),
            Event::ValBegin => self.on_val_begin(run),
            Event::ValEnd => self.on_val_end(run),
            Event::StopTrain => self.on_stop_train(run),
            Event::TrainEnd => self.on_train_end(run),
        }
    }
}
