//! Model collaborator contract
//!
//! The crate never computes a forward or backward pass itself; it drives an
//! implementation of [`Model`] supplied by the caller.

use crate::train::Mode;
use crate::Result;

/// Serialized trainable-parameter state, as produced by the model
/// collaborator and embedded in checkpoint records.
pub type ParamState = serde_json::Value;

/// A trainable model driven by the loop engine.
///
/// Implementations own the parameter storage and the gradient machinery.
/// The associated types are `Clone` because the engine snapshots the
/// current batch into the shared [`RunState`](crate::RunState) for hooks;
/// tensor handles are expected to be cheap reference clones.
pub trait Model {
    type Input: Clone;
    type Target: Clone;
    type Output: Clone;

    /// Compute the output for one batch of inputs.
    fn forward(&mut self, input: &Self::Input) -> Result<Self::Output>;

    /// Switch between training and validation behavior.
    ///
    /// Gradient tracking must be enabled only in [`Mode::Training`]; a
    /// validation pass runs entirely under the `Validating` policy and
    /// must leave the trainable parameters untouched.
    fn set_mode(&mut self, mode: Mode);

    /// Serialize the current trainable-parameter state.
    fn param_state(&self) -> Result<ParamState>;

    /// Restore trainable-parameter state from a checkpoint record.
    fn load_param_state(&mut self, state: &ParamState) -> Result<()>;
}
