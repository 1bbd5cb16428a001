//! Checkpoint persistence

mod checkpoint;

pub use checkpoint::{CheckpointRecord, CheckpointWriter, FINAL_SLOT, ROLLING_SLOT};
