//! Core Trainer struct and construction

use crate::config::RunConfig;
use crate::io::CheckpointWriter;
use crate::model::Model;
use crate::optim::{LrScheduler, Optimizer};
use crate::train::hook::{Hook, HookRegistry};
use crate::train::state::RunState;
use crate::train::{BatchSource, LossFn};
use crate::Result;
use std::time::Instant;

/// Boxed batch source matching a model's input and target types
pub(crate) type Source<M> =
    Box<dyn BatchSource<Input = <M as Model>::Input, Target = <M as Model>::Target>>;

/// Orchestrates the training loop over a model and its collaborators.
///
/// The trainer owns every collaborator for the duration of a run; hooks
/// observe and redirect the loop through the shared [`RunState`] passed to
/// each dispatch.
///
/// # Example
///
/// ```rust,ignore
/// let mut trainer = Trainer::new(
///     model,
///     Box::new(train_data),
///     Box::new(val_data),
///     Box::new(optimizer),
///     Box::new(scheduler),
///     Box::new(loss_fn),
///     RunConfig::new("mnist", "runs/"),
/// )?;
/// trainer.add_hook(Progress::new(50));
/// let summary = trainer.run(10)?;
/// ```
pub struct Trainer<M: Model> {
    pub(crate) model: M,
    pub(crate) train_data: Source<M>,
    pub(crate) val_data: Source<M>,
    pub(crate) optimizer: Box<dyn Optimizer>,
    pub(crate) scheduler: Box<dyn LrScheduler>,
    pub(crate) loss_fn: Box<dyn LossFn<M::Output, M::Target>>,
    pub(crate) hooks: HookRegistry<M>,
    pub(crate) state: RunState<M>,
    pub(crate) config: RunConfig,
    pub(crate) writer: CheckpointWriter,
    pub(crate) best_loss: Option<f32>,
    pub(crate) start_time: Option<Instant>,
}

impl<M: Model> Trainer<M> {
    /// Create a new trainer.
    ///
    /// The configuration is validated here, before any batch is processed;
    /// a configuration fault never reaches the loop.
    pub fn new(
        model: M,
        train_data: Source<M>,
        val_data: Source<M>,
        optimizer: Box<dyn Optimizer>,
        scheduler: Box<dyn LrScheduler>,
        loss_fn: Box<dyn LossFn<M::Output, M::Target>>,
        config: RunConfig,
    ) -> Result<Self> {
        config.validate()?;
        let writer = CheckpointWriter::new(&config.output_dir, &config.experiment);
        let state = RunState::new(config.clone(), config.epochs, optimizer.lr());
        Ok(Self {
            model,
            train_data,
            val_data,
            optimizer,
            scheduler,
            loss_fn,
            hooks: HookRegistry::new(),
            state,
            config,
            writer,
            best_loss: None,
            start_time: None,
        })
    }

    /// Append a hook at the end of the dispatch order
    pub fn add_hook<H: Hook<M> + 'static>(&mut self, hook: H) {
        self.hooks.push(hook);
    }

    /// Insert a hook at an explicit dispatch position
    pub fn insert_hook<H: Hook<M> + 'static>(&mut self, index: usize, hook: H) {
        self.hooks.insert(index, hook);
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Get reference to the model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get mutable reference to the model
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Get the shared run state
    pub fn state(&self) -> &RunState<M> {
        &self.state
    }

    /// Get reference to the hook registry
    pub fn hooks(&self) -> &HookRegistry<M> {
        &self.hooks
    }

    /// Consume the trainer, returning the model
    pub fn into_model(self) -> M {
        self.model
    }

    /// Get the checkpoint writer for this run
    pub fn checkpoints(&self) -> &CheckpointWriter {
        &self.writer
    }

    /// Write the current `{config, params}` record to a named slot
    pub(crate) fn save_checkpoint(&self, slot: &str) -> Result<()> {
        let params = self.model.param_state()?;
        self.writer.save(slot, &self.config, &params)
    }
}
