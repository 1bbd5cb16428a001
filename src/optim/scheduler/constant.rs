//! Constant learning rate scheduler

use super::LrScheduler;

/// Fixed learning rate; advancing is a no-op.
pub struct ConstantLr {
    lr: f32,
    update_on_step: bool,
}

impl ConstantLr {
    /// Create a new constant scheduler
    pub fn new(lr: f32, update_on_step: bool) -> Self {
        Self { lr, update_on_step }
    }
}

impl LrScheduler for ConstantLr {
    fn lr(&self) -> f32 {
        self.lr
    }

    fn step(&mut self) {}

    fn update_on_step(&self) -> bool {
        self.update_on_step
    }
}
