//! Learning-rate sweep (LR finder)
//!
//! A bounded diagnostic sub-run that grows the learning rate exponentially
//! each training step to characterize loss sensitivity. The sweep reuses
//! the full loop engine (hooks, checkpointing and lifecycle semantics
//! apply identically) with a derived configuration and three appended
//! hooks: a step budget, a rate recorder and a loss recorder.

use crate::config::{OptimizerSpec, RunConfig, SchedulerSpec, ValidationError};
use crate::model::Model;
use crate::optim::build_scheduler;
use crate::train::hook::{LossCollect, LrCollect, StepLimit, LOSS_SERIES, LR_SERIES};
use crate::train::Trainer;
use crate::Result;

/// Bounds of a learning-rate sweep
///
/// # Example
///
/// ```rust
/// use orquestar::LrSweep;
///
/// let sweep = LrSweep::new(1e-7, 10.0, 500).unwrap();
/// assert!(sweep.growth_factor() > 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LrSweep {
    min_rate: f32,
    max_rate: f32,
    iterations: usize,
}

impl LrSweep {
    /// Create a sweep over `[min_rate, max_rate]` in `iterations` steps.
    ///
    /// Non-positive or inverted bounds and a zero iteration count are
    /// configuration faults, rejected before any batch is processed.
    pub fn new(min_rate: f32, max_rate: f32, iterations: usize) -> Result<Self> {
        if !min_rate.is_finite() || !max_rate.is_finite() || min_rate <= 0.0 || max_rate <= min_rate
        {
            return Err(ValidationError::InvalidSweepBounds { min: min_rate, max: max_rate }.into());
        }
        if iterations == 0 {
            return Err(ValidationError::InvalidSweepIterations(0).into());
        }
        Ok(Self { min_rate, max_rate, iterations })
    }

    /// The sweep's starting rate
    pub fn min_rate(&self) -> f32 {
        self.min_rate
    }

    /// The sweep's final rate bound
    pub fn max_rate(&self) -> f32 {
        self.max_rate
    }

    /// Training steps the sweep runs for
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Per-step exponential growth factor: `(max/min)^(1/iterations)`
    pub fn growth_factor(&self) -> f32 {
        ((self.max_rate / self.min_rate).ln() / self.iterations as f32).exp()
    }

    /// Derive the sweep's run configuration from a base config.
    ///
    /// A fresh config is produced rather than mutating the base in place,
    /// so sweep-only settings cannot leak into a subsequent normal run.
    pub(crate) fn derive_config(&self, base: &RunConfig) -> RunConfig {
        base.clone()
            .with_epochs(self.iterations)
            .with_train_only(true)
            .with_optimizer(OptimizerSpec {
                base_lr: self.min_rate,
                ..base.optimizer.clone()
            })
            .with_scheduler(SchedulerSpec::exponential_per_step(self.growth_factor()))
    }
}

/// Collected sweep sequences, one entry per training step
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// Learning rate applied at each step
    pub rates: Vec<f32>,
    /// Loss observed at each step
    pub losses: Vec<f32>,
}

impl<M: Model> Trainer<M> {
    /// Run a learning-rate sweep.
    ///
    /// Reconfigures the optimizer's base rate to the sweep minimum,
    /// rebuilds the scheduler as per-step exponential growth, appends the
    /// sweep hooks to the existing registry and re-invokes the loop for
    /// `iterations` training steps in training-only mode.
    ///
    /// Consumes the trainer: the reconfiguration is sweep-only and must
    /// not carry into a normal run.
    pub fn lr_sweep(mut self, sweep: LrSweep) -> Result<SweepReport> {
        let config = sweep.derive_config(&self.config);
        log::info!(
            "lr sweep '{}': {:.2e} -> {:.2e} over {} steps (factor {:.5})",
            config.experiment,
            sweep.min_rate(),
            sweep.max_rate(),
            sweep.iterations(),
            sweep.growth_factor()
        );

        self.scheduler = build_scheduler(&config.scheduler, config.optimizer.base_lr)?;
        self.optimizer.set_lr(sweep.min_rate());
        self.config = config;

        self.hooks.push(StepLimit::new(sweep.iterations()));
        self.hooks.push(LrCollect::new());
        self.hooks.push(LossCollect::new());

        self.run(sweep.iterations())?;

        let rates = self.state.series(LR_SERIES).unwrap_or_default().to_vec();
        let losses = self.state.series(LOSS_SERIES).unwrap_or_default().to_vec();
        Ok(SweepReport { rates, losses })
    }
}
