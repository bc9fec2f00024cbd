//! Dash budget with a single background refill process.

use super::timers::Countdown;
use crate::movement::resources::DashTuning;

#[derive(Debug, Clone, Default)]
pub struct DashBudget {
    pub remaining: u32,
    pub cooldown_timer: f32,
    pub cooldown_running: bool,
    /// Time left in the current dash
    pub active: Countdown,
}

impl DashBudget {
    pub fn new(tuning: &DashTuning) -> Self {
        Self {
            remaining: tuning.max_dashes,
            ..Default::default()
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.active.is_active()
    }

    /// Spends one charge and starts the refill process if it is not already
    /// running. Returns false when the budget is empty.
    pub fn consume(&mut self, tuning: &DashTuning) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.active.start(tuning.duration);
        if !self.cooldown_running {
            self.cooldown_running = true;
            self.cooldown_timer = tuning.cooldown_duration;
        }
        true
    }

    /// Advances the refill process; one charge comes back every cooldown until
    /// the budget is full, then the process halts. Returns charges restored.
    pub fn tick(&mut self, tuning: &DashTuning, dt: f32) -> u32 {
        self.active.tick(dt);
        if !self.cooldown_running {
            return 0;
        }

        let mut restored = 0;
        self.cooldown_timer -= dt;
        while self.cooldown_running && self.cooldown_timer <= 0.0 {
            self.remaining = (self.remaining + 1).min(tuning.max_dashes);
            restored += 1;
            if self.remaining >= tuning.max_dashes || tuning.cooldown_duration <= 0.0 {
                self.remaining = tuning.max_dashes;
                self.cooldown_running = false;
                self.cooldown_timer = 0.0;
            } else {
                self.cooldown_timer += tuning.cooldown_duration;
            }
        }
        restored
    }

    /// Full budget, no refill running, no dash in progress.
    pub fn reset(&mut self, tuning: &DashTuning) {
        *self = Self::new(tuning);
    }
}
