//! Lifecycle hooks
//!
//! This module provides the hook contract and the hooks shipped with the
//! crate:
//! - `EarlyStopping` - stop when the epoch loss plateaus
//! - `StepLimit` - stop after a fixed number of training steps
//! - `LrCollect` / `LossCollect` - per-step series recorders
//! - `Progress` - interval logging through the `log` facade

mod collect;
mod early_stopping;
mod progress;
mod registry;
mod step_limit;
mod traits;

pub use collect::{LossCollect, LrCollect, LOSS_SERIES, LR_SERIES};
pub use early_stopping::EarlyStopping;
pub use progress::Progress;
pub use registry::HookRegistry;
pub use step_limit::StepLimit;
pub use traits::{Event, Hook};
