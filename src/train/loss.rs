//! Loss collaborator contracts

use crate::Result;

/// A scalar loss with gradient-producing capability.
///
/// `backward` pushes gradients into whatever parameter storage the model
/// collaborator shares with its loss values; the engine only sequences the
/// call between the `before_backward` event and the optimizer update.
pub trait Loss {
    /// The scalar loss value
    fn value(&self) -> f32;

    /// Compute gradients for the trainable parameters
    fn backward(&mut self) -> Result<()>;
}

/// Trait for loss functions
pub trait LossFn<O, T>: Send {
    /// Compute the loss from a model output and a target
    fn forward(&self, output: &O, target: &T) -> Result<Box<dyn Loss>>;
}
