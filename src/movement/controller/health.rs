//! Health, invincibility and stun-lock tracking.

use bevy::log::debug;

use super::context::{EffectId, SimContext, SoundId};
use super::timers::Countdown;
use crate::movement::resources::HealthTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Hazard,
    Fall,
    OutOfBounds,
    Scripted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Zero damage, invincible, or already dead
    Ignored,
    Hurt,
    Killed,
}

#[derive(Debug, Clone)]
pub struct HealthTracker {
    pub current: i32,
    pub max: i32,
    pub invincibility: Countdown,
    pub stun_lock: Countdown,
    pub bleeding: bool,
    /// Seconds until respawn while dead
    pub death_timer: Option<f32>,
}

impl HealthTracker {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            invincibility: Countdown::default(),
            stun_lock: Countdown::default(),
            bleeding: false,
            death_timer: None,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn is_stun_locked(&self) -> bool {
        self.stun_lock.is_active()
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn damage(
        &mut self,
        amount: i32,
        grants_invincibility: bool,
        cause: DamageCause,
        tuning: &HealthTuning,
        ctx: &mut SimContext<'_>,
    ) -> DamageOutcome {
        if amount <= 0 || self.is_invincible() || self.current <= 0 {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).clamp(0, self.max);
        if grants_invincibility {
            self.invincibility.start(tuning.invincibility_time);
        }
        self.stun_lock.start(tuning.hurt_stun_time);

        ctx.effect(EffectId::HurtFlash);
        ctx.effect(EffectId::DamageTint);
        ctx.sound(SoundId::Hurt);
        ctx.shake(tuning.hurt_shake.duration, tuning.hurt_shake.magnitude);

        if self.current == 1 && self.max > 1 && !self.bleeding {
            self.bleeding = true;
            ctx.effect(EffectId::Bleeding);
        }

        debug!(
            "Damage: {} from {:?}, health now {}/{}",
            amount, cause, self.current, self.max
        );

        if self.current <= 0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Forces health to zero regardless of invincibility.
    pub fn zero(&mut self) {
        self.current = 0;
    }

    pub fn start_death_timer(&mut self, tuning: &HealthTuning) {
        self.death_timer = Some(tuning.death_time.max(0.0));
    }

    /// Advances invincibility, stun-lock and the death delay. Returns true on
    /// the tick the death delay elapses.
    pub fn tick(&mut self, dt: f32, ctx: &mut SimContext<'_>) -> bool {
        if self.invincibility.tick(dt) && !self.is_dead() {
            ctx.stop_effect(EffectId::DamageTint);
        }
        self.stun_lock.tick(dt);

        match self.death_timer.as_mut() {
            Some(remaining) => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.death_timer = None;
                    return true;
                }
                false
            }
            None => false,
        }
    }

    /// Drops both timed states at once.
    pub fn clear_timers(&mut self, ctx: &mut SimContext<'_>) {
        if self.invincibility.is_active() {
            ctx.stop_effect(EffectId::DamageTint);
        }
        self.invincibility.clear();
        self.stun_lock.clear();
    }

    /// Full health with no lingering hurt state.
    pub fn restore(&mut self, ctx: &mut SimContext<'_>) {
        self.clear_timers(ctx);
        if self.bleeding {
            ctx.stop_effect(EffectId::Bleeding);
        }
        self.bleeding = false;
        self.current = self.max;
        self.death_timer = None;
    }
}
