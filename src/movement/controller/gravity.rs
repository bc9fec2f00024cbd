//! Gravity and fall model: asymmetric gravity, fall-speed cap, landing tiers.

use super::context::{EffectId, SimContext, SoundId};
use crate::movement::resources::{GravityTuning, LandingTuning, ShakeTuning};

/// Vertical speed below which the body counts as falling.
pub const FALLING_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FallState {
    pub is_falling: bool,
    pub is_fast_falling: bool,
    pub at_max_fall_speed: bool,
    /// Downward speed at the end of the last step, kept for the landing check
    /// because the physics solver zeroes velocity on touchdown
    pub impact_speed: f32,
}

/// Impact severity on touchdown, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingTier {
    MaxFall,
    FastFall,
    High,
    Low,
    None,
}

impl LandingTier {
    pub fn effect(&self) -> Option<EffectId> {
        match self {
            LandingTier::MaxFall => Some(EffectId::LandMaxFall),
            LandingTier::FastFall => Some(EffectId::LandFastFall),
            LandingTier::High => Some(EffectId::LandHigh),
            LandingTier::Low => Some(EffectId::LandLow),
            LandingTier::None => None,
        }
    }

    pub fn sound(&self) -> Option<SoundId> {
        match self {
            LandingTier::MaxFall | LandingTier::FastFall => Some(SoundId::LandHeavy),
            LandingTier::High => Some(SoundId::LandHard),
            LandingTier::Low => Some(SoundId::LandSoft),
            LandingTier::None => None,
        }
    }

    pub fn shake(&self, tuning: &LandingTuning) -> ShakeTuning {
        match self {
            LandingTier::MaxFall => tuning.max_fall_shake,
            LandingTier::FastFall => tuning.fast_fall_shake,
            LandingTier::High => tuning.high_shake,
            LandingTier::Low => tuning.low_shake,
            LandingTier::None => ShakeTuning::default(),
        }
    }
}

/// Vertical velocity after one step of gravity, floored at the fall cap.
pub fn apply_gravity(vy: f32, tuning: &GravityTuning, dt: f32) -> f32 {
    let multiplier = if vy > 0.0 {
        1.0
    } else {
        tuning.fall_multiplier
    };
    clamp_fall(vy - tuning.gravity * multiplier * dt, tuning)
}

pub fn clamp_fall(vy: f32, tuning: &GravityTuning) -> f32 {
    vy.max(-tuning.max_fall_speed)
}

pub fn classify_landing(
    impact_speed: f32,
    fall: &FallState,
    landing: &LandingTuning,
) -> LandingTier {
    if fall.at_max_fall_speed {
        LandingTier::MaxFall
    } else if fall.is_fast_falling {
        LandingTier::FastFall
    } else if impact_speed >= landing.high_speed {
        LandingTier::High
    } else if impact_speed >= landing.low_speed {
        LandingTier::Low
    } else {
        LandingTier::None
    }
}

impl FallState {
    /// Refreshes the fall flags from the current vertical speed. Reaching the
    /// cap fires its streak effect and shake once.
    pub fn update(&mut self, vy: f32, tuning: &GravityTuning, ctx: &mut SimContext<'_>) {
        self.is_falling = vy < -FALLING_SPEED;
        self.impact_speed = (-vy).max(0.0);
        self.is_fast_falling = vy < -tuning.fast_fall_threshold;

        let at_max = vy <= -tuning.max_fall_speed;
        if at_max && !self.at_max_fall_speed {
            ctx.effect(EffectId::MaxFallStreaks);
            ctx.shake(tuning.max_fall_shake.duration, tuning.max_fall_shake.magnitude);
        } else if !at_max && self.at_max_fall_speed {
            ctx.stop_effect(EffectId::MaxFallStreaks);
        }
        self.at_max_fall_speed = at_max;
    }

    pub fn clear(&mut self, ctx: &mut SimContext<'_>) {
        if self.at_max_fall_speed {
            ctx.stop_effect(EffectId::MaxFallStreaks);
        }
        *self = FallState::default();
    }
}
