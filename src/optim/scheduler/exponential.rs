//! Exponential learning rate scheduler

use super::LrScheduler;

/// Exponential Learning Rate Scheduler
///
/// Multiplies the learning rate by gamma on every advance.
///
/// Formula: lr_t = lr_initial * gamma^t
///
/// With gamma > 1 this grows the rate each advance, which is how the
/// learning-rate sweep ramps from its minimum to its maximum bound.
pub struct ExponentialLr {
    lr_initial: f32,
    gamma: f32,
    advances: u32,
    update_on_step: bool,
}

impl ExponentialLr {
    /// Create a new exponential scheduler
    ///
    /// # Arguments
    /// * `lr_initial` - Initial learning rate
    /// * `gamma` - Multiplicative factor per advance
    /// * `update_on_step` - Advance per training batch instead of per epoch
    pub fn new(lr_initial: f32, gamma: f32, update_on_step: bool) -> Self {
        Self { lr_initial, gamma, advances: 0, update_on_step }
    }
}

impl LrScheduler for ExponentialLr {
    fn lr(&self) -> f32 {
        self.lr_initial * self.gamma.powi(self.advances as i32)
    }

    fn step(&mut self) {
        self.advances += 1;
    }

    fn update_on_step(&self) -> bool {
        self.update_on_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential_decay() {
        let mut sched = ExponentialLr::new(1.0, 0.5, false);
        assert_eq!(sched.lr(), 1.0);
        sched.step();
        assert_eq!(sched.lr(), 0.5);
        sched.step();
        assert_eq!(sched.lr(), 0.25);
    }

    #[test]
    fn test_exponential_growth() {
        let mut sched = ExponentialLr::new(1e-7, 10.0, true);
        for _ in 0..8 {
            sched.step();
        }
        assert_relative_eq!(sched.lr(), 10.0, max_relative = 1e-4);
    }
}
