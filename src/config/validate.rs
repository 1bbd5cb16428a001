//! Configuration validation
//!
//! All configuration faults are rejected here, before any batch is
//! processed. The sweep controller reuses the same error type for its
//! bounds checks.

use super::{RunConfig, SchedulerKind};
use thiserror::Error;

/// Configuration fault
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("experiment name must not be empty")]
    EmptyExperimentName,

    #[error("invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("invalid learning rate: {0} (must be > 0.0)")]
    InvalidLearningRate(f32),

    #[error("invalid weight decay: {0} (must be >= 0.0)")]
    InvalidWeightDecay(f32),

    #[error("invalid scheduler gamma: {0} (must be > 0.0)")]
    InvalidGamma(f32),

    #[error("invalid scheduler step size: {0} (must be > 0)")]
    InvalidStepSize(usize),

    #[error("scheduler must declare exactly one update granularity, got {0}")]
    SchedulerGranularity(&'static str),

    #[error("invalid sweep bounds: min {min}, max {max} (must be positive with min < max)")]
    InvalidSweepBounds { min: f32, max: f32 },

    #[error("invalid sweep iterations: {0} (must be > 0)")]
    InvalidSweepIterations(usize),
}

/// Validate a run configuration
pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.experiment.is_empty() {
        return Err(ValidationError::EmptyExperimentName);
    }
    if config.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(0));
    }
    if config.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(0));
    }

    let optim = &config.optimizer;
    if !(optim.base_lr > 0.0) || !optim.base_lr.is_finite() {
        return Err(ValidationError::InvalidLearningRate(optim.base_lr));
    }
    if optim.weight_decay < 0.0 || !optim.weight_decay.is_finite() {
        return Err(ValidationError::InvalidWeightDecay(optim.weight_decay));
    }

    let sched = &config.scheduler;
    match (sched.update_on_step, sched.update_on_epoch) {
        (true, true) => return Err(ValidationError::SchedulerGranularity("both")),
        (false, false) => return Err(ValidationError::SchedulerGranularity("neither")),
        _ => {}
    }
    if !(sched.gamma > 0.0) || !sched.gamma.is_finite() {
        return Err(ValidationError::InvalidGamma(sched.gamma));
    }
    if sched.kind == SchedulerKind::Step && sched.step_size == 0 {
        return Err(ValidationError::InvalidStepSize(0));
    }

    Ok(())
}
