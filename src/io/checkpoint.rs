//! Checkpoint records and the slot writer
//!
//! One checkpoint record per slot, keyed by `(experiment, slot)` under an
//! output directory. The record is serialized in full before anything
//! touches the filesystem and lands via a sibling temp file and a rename,
//! so a failed write never leaves a corrupt partial record behind. Write
//! failures are fatal to the run.

use crate::config::RunConfig;
use crate::model::ParamState;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Slot overwritten after every epoch
pub const ROLLING_SLOT: &str = "checkpoint";

/// Slot written exactly once, at run end or early stop
pub const FINAL_SLOT: &str = "final";

/// One immutable checkpoint snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointRecord {
    /// The configuration the run was built from
    pub config: RunConfig,
    /// Trainable-parameter state as serialized by the model collaborator
    pub params: ParamState,
    /// RFC3339 write timestamp
    pub saved_at: String,
}

/// Writes checkpoint records to named slots
pub struct CheckpointWriter {
    output_dir: PathBuf,
    experiment: String,
}

impl CheckpointWriter {
    /// Create a writer for one experiment
    pub fn new(output_dir: impl Into<PathBuf>, experiment: impl Into<String>) -> Self {
        Self { output_dir: output_dir.into(), experiment: experiment.into() }
    }

    /// Path of a named slot
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{slot}.json", self.experiment))
    }

    /// Write one `{config, params}` record to a named slot, atomically.
    pub fn save(&self, slot: &str, config: &RunConfig, params: &ParamState) -> Result<()> {
        let record = CheckpointRecord {
            config: config.clone(),
            params: params.clone(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };
        let data = serde_json::to_string_pretty(&record)
            .map_err(|e| Error::Serialization(format!("checkpoint record: {e}")))?;

        fs::create_dir_all(&self.output_dir).map_err(|e| self.fault(slot, &e))?;

        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(|e| self.fault(slot, &e))?;
        fs::rename(&tmp, &path).map_err(|e| self.fault(slot, &e))?;

        log::debug!("wrote checkpoint slot '{slot}' to {}", path.display());
        Ok(())
    }

    /// Read a record back from a named slot
    pub fn load(&self, slot: &str) -> Result<CheckpointRecord> {
        let path = self.slot_path(slot);
        let text = fs::read_to_string(&path).map_err(|e| self.fault(slot, &e))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Serialization(format!("checkpoint record at {}: {e}", path.display())))
    }

    fn fault(&self, slot: &str, cause: &dyn std::fmt::Display) -> Error {
        Error::Checkpoint { slot: slot.to_string(), message: cause.to_string() }
    }
}

impl std::fmt::Debug for CheckpointWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckpointWriter")
            .field("output_dir", &self.output_dir)
            .field("experiment", &self.experiment)
            .finish()
    }
}
