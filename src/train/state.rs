//! Shared run state
//!
//! One [`RunState`] exists per active run. The loop engine mutates it every
//! batch and epoch; every hook dispatch receives it by `&mut` reference and
//! may read or write any field, but never replaces the instance wholesale.

use crate::config::RunConfig;
use crate::model::Model;
use std::collections::HashMap;

/// Series key the engine records per-epoch mean training loss under
pub const TRAIN_LOSS_SERIES: &str = "train_loss";

/// Series key the engine records per-epoch mean validation loss under
pub const VAL_LOSS_SERIES: &str = "val_loss";

/// Whether the loop is in a training or a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Gradients tracked, parameters updated, step counter advancing
    Training,
    /// Forward passes only; parameters must not change
    Validating,
}

/// Mutable state shared between the loop engine and all hooks for the
/// duration of one run.
pub struct RunState<M: Model> {
    /// Current epoch, 1-based
    pub epoch: usize,
    /// Total epochs requested for this run
    pub epochs_total: usize,
    /// Global step counter; advances once per training batch, never during
    /// validation
    pub step: usize,
    /// Current pass mode
    pub mode: Mode,
    /// Learning rate currently applied by the optimizer
    pub lr: f32,
    /// Input of the batch currently in flight
    pub input: Option<M::Input>,
    /// Target of the batch currently in flight
    pub target: Option<M::Target>,
    /// Model output for the current batch, available from `before_loss`
    pub output: Option<M::Output>,
    /// Scalar loss for the current batch, available from `before_backward`
    pub loss: Option<f32>,
    /// The configuration this run was built from
    pub config: RunConfig,
    series: HashMap<String, Vec<f32>>,
}

impl<M: Model> RunState<M> {
    /// Create a fresh state for a run
    pub fn new(config: RunConfig, epochs_total: usize, lr: f32) -> Self {
        Self {
            epoch: 0,
            epochs_total,
            step: 0,
            mode: Mode::Training,
            lr,
            input: None,
            target: None,
            output: None,
            loss: None,
            config,
            series: HashMap::new(),
        }
    }

    /// Snapshot the next batch and clear the per-batch outputs
    pub(crate) fn begin_batch(&mut self, input: M::Input, target: M::Target) {
        self.input = Some(input);
        self.target = Some(target);
        self.output = None;
        self.loss = None;
    }

    /// Append a value to a named series.
    ///
    /// Hooks use this to accumulate metrics (the learning-rate sweep reads
    /// its rate and loss sequences back out of here); the engine itself
    /// records per-epoch mean losses.
    pub fn publish(&mut self, key: &str, value: f32) {
        self.series.entry(key.to_string()).or_default().push(value);
    }

    /// Read a named series
    pub fn series(&self, key: &str) -> Option<&[f32]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// Last value of a named series
    pub fn latest(&self, key: &str) -> Option<f32> {
        self.series.get(key).and_then(|s| s.last().copied())
    }
}
