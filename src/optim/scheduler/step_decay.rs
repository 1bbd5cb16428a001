//! Step decay learning rate scheduler

use super::LrScheduler;

/// Step Decay Learning Rate Scheduler
///
/// Multiplies the learning rate by gamma every `step_size` advances.
///
/// Formula: lr_t = lr_initial * gamma^(floor(t / step_size))
pub struct StepDecayLr {
    lr_initial: f32,
    gamma: f32,
    step_size: usize,
    advances: usize,
    update_on_step: bool,
}

impl StepDecayLr {
    /// Create a new step decay scheduler
    ///
    /// # Arguments
    /// * `lr_initial` - Initial learning rate
    /// * `step_size` - Decay every `step_size` advances
    /// * `gamma` - Multiplicative factor (e.g., 0.1 for a 10x reduction)
    /// * `update_on_step` - Advance per training batch instead of per epoch
    pub fn new(lr_initial: f32, step_size: usize, gamma: f32, update_on_step: bool) -> Self {
        Self { lr_initial, gamma, step_size, advances: 0, update_on_step }
    }
}

impl LrScheduler for StepDecayLr {
    fn lr(&self) -> f32 {
        if self.step_size == 0 {
            return self.lr_initial;
        }
        let num_decays = self.advances / self.step_size;
        self.lr_initial * self.gamma.powi(num_decays as i32)
    }

    fn step(&mut self) {
        self.advances += 1;
    }

    fn update_on_step(&self) -> bool {
        self.update_on_step
    }
}
