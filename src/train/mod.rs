//! The training loop
//!
//! This module provides the orchestration core:
//! - Batch data structures and the batch source contract
//! - Loss function contract
//! - The shared run state hooks read and write
//! - Lifecycle hooks and their ordered registry
//! - The Trainer loop over run → epoch → batch

pub mod hook;

mod batch;
mod loss;
mod state;
mod trainer;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{Batch, BatchSource};
pub use hook::{Event, Hook, HookRegistry};
pub use loss::{Loss, LossFn};
pub use state::{Mode, RunState, TRAIN_LOSS_SERIES, VAL_LOSS_SERIES};
pub use trainer::{RunSummary, Trainer};
