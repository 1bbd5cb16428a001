//! Run configuration
//!
//! A [`RunConfig`] is the read-only record a run is built from: experiment
//! identity, output location, batch/epoch counts, and the optimizer and
//! scheduler parameters. It is serde-serializable because every checkpoint
//! record embeds the configuration it was produced under. The only mutation
//! path is the sweep controller, which derives a fresh config through the
//! builder methods rather than editing one in place.

mod validate;

pub use validate::{validate_config, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optimizer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSpec {
    /// Base learning rate
    #[serde(default = "default_base_lr")]
    pub base_lr: f32,
    /// L2 weight decay
    #[serde(default)]
    pub weight_decay: f32,
}

fn default_base_lr() -> f32 {
    1e-3
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self { base_lr: default_base_lr(), weight_decay: 0.0 }
    }
}

/// Learning rate schedule family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerKind {
    /// Fixed learning rate
    #[default]
    Constant,
    /// Multiply by gamma every `step_size` advances
    Step,
    /// Multiply by gamma on every advance (the sweep's growth schedule)
    Exponential,
}

/// Scheduler parameters, including the update granularity
///
/// A scheduler declares exactly one granularity: `update_on_step` advances
/// it once per training batch, `update_on_epoch` once per epoch after the
/// validation pass. Declaring neither or both is a configuration fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSpec {
    #[serde(default)]
    pub kind: SchedulerKind,
    /// Multiplicative factor (decay when < 1, growth when > 1)
    #[serde(default = "default_gamma")]
    pub gamma: f32,
    /// Advances between decays for the step schedule
    #[serde(default = "default_step_size")]
    pub step_size: usize,
    #[serde(default)]
    pub update_on_step: bool,
    #[serde(default = "default_true")]
    pub update_on_epoch: bool,
}

fn default_gamma() -> f32 {
    0.1
}

fn default_step_size() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for SchedulerSpec {
    fn default() -> Self {
        Self {
            kind: SchedulerKind::Constant,
            gamma: default_gamma(),
            step_size: default_step_size(),
            update_on_step: false,
            update_on_epoch: true,
        }
    }
}

impl SchedulerSpec {
    /// Per-step exponential schedule with the given factor
    pub fn exponential_per_step(gamma: f32) -> Self {
        Self {
            kind: SchedulerKind::Exponential,
            gamma,
            step_size: default_step_size(),
            update_on_step: true,
            update_on_epoch: false,
        }
    }
}

/// Configuration for one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Experiment name, used as the checkpoint file prefix
    pub experiment: String,
    /// Directory checkpoint slots are written under
    pub output_dir: PathBuf,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// Skip every validation pass (set by the sweep controller)
    #[serde(default)]
    pub train_only: bool,
    #[serde(default)]
    pub optimizer: OptimizerSpec,
    #[serde(default)]
    pub scheduler: SchedulerSpec,
}

fn default_batch_size() -> usize {
    32
}

fn default_epochs() -> usize {
    10
}

impl RunConfig {
    /// Create a config with defaults for everything but the identity
    pub fn new(experiment: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            experiment: experiment.into(),
            output_dir: output_dir.into(),
            batch_size: default_batch_size(),
            epochs: default_epochs(),
            train_only: false,
            optimizer: OptimizerSpec::default(),
            scheduler: SchedulerSpec::default(),
        }
    }

    /// Set the epoch count
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Skip validation passes entirely
    pub fn with_train_only(mut self, train_only: bool) -> Self {
        self.train_only = train_only;
        self
    }

    /// Set the optimizer parameters
    pub fn with_optimizer(mut self, optimizer: OptimizerSpec) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Set the scheduler parameters
    pub fn with_scheduler(mut self, scheduler: SchedulerSpec) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> crate::Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| crate::Error::Serialization(format!("failed to parse YAML config: {e}")))
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Check the config for faults; see [`validate_config`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_config(self)
    }
}
