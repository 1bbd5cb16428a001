//! Crate-wide error types
//!
//! Every fault is fatal and surfaced immediately: hook faults identify the
//! offending hook and lifecycle event, computation faults propagate from
//! the collaborators, checkpoint faults name the slot. Nothing is retried.

use crate::config::ValidationError;
use crate::train::hook::Event;
use thiserror::Error;

/// Orchestration errors
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected at configuration time, before any batch is processed
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    /// A hook callback failed during dispatch
    #[error("hook '{hook}' failed during '{event}': {message}")]
    Hook {
        hook: String,
        event: Event,
        message: String,
    },

    /// Model, loss, or optimizer computation failed
    #[error("computation failed: {0}")]
    Compute(String),

    /// A checkpoint record could not be written or read
    #[error("checkpoint slot '{slot}': {message}")]
    Checkpoint { slot: String, message: String },

    /// Serialization failed
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, Error>;
