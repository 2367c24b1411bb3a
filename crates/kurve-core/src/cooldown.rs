use serde::{Deserialize, Serialize};

/// Scalar count-down timer, floored at zero.
///
/// The simulation uses the same timer for trail painting, hitbox
/// emission, countdown stepping, power-up spawning, and the
/// portal-border revert. A value of exactly zero means "ready".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown(f32);

impl Default for Cooldown {
    fn default() -> Self {
        Self::ready()
    }
}

impl Cooldown {
    /// A cooldown that has already elapsed.
    pub fn ready() -> Self {
        Self(0.0)
    }

    /// A cooldown with `secs` of simulated time remaining.
    pub fn new(secs: f32) -> Self {
        Self(secs.max(0.0))
    }

    /// Remaining simulated time. Never negative.
    pub fn remaining(&self) -> f32 {
        self.0
    }

    pub fn is_ready(&self) -> bool {
        self.0 == 0.0
    }

    /// Restart the timer at `secs`.
    pub fn set(&mut self, secs: f32) {
        self.0 = secs.max(0.0);
    }

    /// Age the timer by `dt` seconds of simulated time.
    pub fn tick(&mut self, dt: f32) {
        self.0 = (self.0 - dt).max(0.0);
    }

    /// Age the timer and report whether this tick made it elapse.
    pub fn tick_elapsed(&mut self, dt: f32) -> bool {
        let was_ready = self.is_ready();
        self.tick(dt);
        !was_ready && self.is_ready()
    }
}
