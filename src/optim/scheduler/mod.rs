//! Learning rate schedulers
//!
//! Provides the scheduling strategies shipped with the crate:
//! - `ConstantLr` - fixed rate
//! - `StepDecayLr` - decay by gamma every N advances
//! - `ExponentialLr` - multiply by gamma on every advance
//!
//! A scheduler also declares its update granularity: `update_on_step()`
//! decides whether the engine advances it once per training batch or once
//! per epoch. The flag comes from the [`SchedulerSpec`] the scheduler was
//! built from and is checked at both engine call sites.

mod constant;
mod exponential;
mod step_decay;

pub use constant::ConstantLr;
pub use exponential::ExponentialLr;
pub use step_decay::StepDecayLr;

use crate::config::{SchedulerKind, SchedulerSpec};
use crate::{Error, Result};

/// Learning rate scheduler trait
pub trait LrScheduler: Send {
    /// Get the current learning rate
    fn lr(&self) -> f32;

    /// Advance the schedule by one unit of its declared granularity
    fn step(&mut self);

    /// True when the schedule advances once per training batch,
    /// false when it advances once per epoch
    fn update_on_step(&self) -> bool;
}

/// Build a scheduler from its configuration.
///
/// The `SchedulerSpec` granularity flags are validated here as well, so a
/// scheduler can never be constructed with neither or both granularities
/// even when the caller skips
/// [`validate_config`](crate::config::validate_config).
pub fn build_scheduler(spec: &SchedulerSpec, base_lr: f32) -> Result<Box<dyn LrScheduler>> {
    let on_step = match (spec.update_on_step, spec.update_on_epoch) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => {
            return Err(Error::Config(
                crate::config::ValidationError::SchedulerGranularity("both"),
            ))
        }
        (false, false) => {
            return Err(Error::Config(
                crate::config::ValidationError::SchedulerGranularity("neither"),
            ))
        }
    };

    let scheduler: Box<dyn LrScheduler> = match spec.kind {
        SchedulerKind::Constant => Box::new(ConstantLr::new(base_lr, on_step)),
        SchedulerKind::Step => {
            Box::new(StepDecayLr::new(base_lr, spec.step_size, spec.gamma, on_step))
        }
        SchedulerKind::Exponential => Box::new(ExponentialLr::new(base_lr, spec.gamma, on_step)),
    };
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerSpec;

    #[test]
    fn test_build_constant() {
        let spec = SchedulerSpec::default();
        let sched = build_scheduler(&spec, 0.01).unwrap();
        assert_eq!(sched.lr(), 0.01);
        assert!(!sched.update_on_step());
    }

    #[test]
    fn test_build_exponential_per_step() {
        let spec = SchedulerSpec::exponential_per_step(2.0);
        let mut sched = build_scheduler(&spec, 0.5).unwrap();
        assert!(sched.update_on_step());
        assert_eq!(sched.lr(), 0.5);
        sched.step();
        assert_eq!(sched.lr(), 1.0);
    }

    #[test]
    fn test_build_step_decay() {
        let spec = SchedulerSpec {
            kind: SchedulerKind::Step,
            gamma: 0.5,
            step_size: 2,
            ..SchedulerSpec::default()
        };
        let mut sched = build_scheduler(&spec, 1.0).unwrap();
        sched.step();
        assert_eq!(sched.lr(), 1.0);
        sched.step();
        assert_eq!(sched.lr(), 0.5);
    }

    #[test]
    fn test_build_rejects_bad_granularity() {
        let both = SchedulerSpec {
            update_on_step: true,
            update_on_epoch: true,
            ..SchedulerSpec::default()
        };
        assert!(build_scheduler(&both, 0.01).is_err());

        let neither = SchedulerSpec {
            update_on_step: false,
            update_on_epoch: false,
            ..SchedulerSpec::default()
        };
        assert!(build_scheduler(&neither, 0.01).is_err());
    }
}
