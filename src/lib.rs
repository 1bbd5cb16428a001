//! Supervised training-loop orchestration
//!
//! This crate drives repeated passes over a training and a validation data
//! stream, runs a forward/backward optimization step per batch, and lets
//! pluggable hooks observe or redirect control flow at named lifecycle
//! points:
//! - Hook trait + ordered registry with OR-aggregated control signals
//! - Trainer loop over run → epoch → batch with train/validation modes
//! - Per-step or per-epoch learning rate scheduling
//! - Rolling and final checkpoints (`{config, params}` records)
//! - Learning-rate sweep (LR finder) reusing the same loop
//!
//! The numerical side (model forward/backward, optimizer update rule, loss
//! gradient) lives behind collaborator traits; the crate orchestrates, it
//! does not compute.
//!
//! # Example
//!
//! ```rust,ignore
//! use orquestar::{RunConfig, Trainer};
//! use orquestar::hook::EarlyStopping;
//!
//! let config = RunConfig::new("mnist-baseline", "runs/").with_epochs(10);
//!
//! let mut trainer = Trainer::new(
//!     model,                  // impl Model
//!     Box::new(train_data),   // impl BatchSource
//!     Box::new(val_data),
//!     Box::new(optimizer),    // impl Optimizer
//!     Box::new(scheduler),    // impl LrScheduler
//!     Box::new(loss_fn),      // impl LossFn
//!     config,
//! )?;
//! trainer.add_hook(EarlyStopping::new(3, 0.001));
//!
//! let summary = trainer.run(10)?;
//! println!("best loss: {:.4}", summary.best_loss);
//! ```

pub mod config;
mod error;
pub mod io;
mod model;
pub mod optim;
mod sweep;
pub mod train;

pub use config::{OptimizerSpec, RunConfig, SchedulerKind, SchedulerSpec};
pub use error::{Error, Result};
pub use io::{CheckpointRecord, CheckpointWriter, FINAL_SLOT, ROLLING_SLOT};
pub use model::{Model, ParamState};
pub use optim::{build_scheduler, LrScheduler, Optimizer};
pub use sweep::{LrSweep, SweepReport};
pub use train::hook::{Event, Hook, HookRegistry};
pub use train::{
    Batch, BatchSource, Loss, LossFn, Mode, RunState, RunSummary, Trainer, TRAIN_LOSS_SERIES,
    VAL_LOSS_SERIES,
};

pub mod hook {
    //! Hooks shipped with the crate.
    pub use crate::train::hook::{
        EarlyStopping, Event, Hook, HookRegistry, LossCollect, LrCollect, Progress, StepLimit,
    };
}
