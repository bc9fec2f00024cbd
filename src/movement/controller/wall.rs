//! Wall-slide and wall-jump.

use bevy::math::Vec2;

use super::body::WallSide;
use super::context::{EffectId, SimContext};
use super::locomotion::lerp;
use super::timers::Countdown;
use crate::movement::resources::WallTuning;

#[derive(Debug, Clone, Copy, Default)]
pub struct WallSlide {
    pub active: bool,
    pub side: Option<WallSide>,
    /// Open right after latching; walking off the wall is ignored meanwhile
    pub stick: Countdown,
}

/// Whether sliding may happen this step.
#[derive(Debug, Clone, Copy)]
pub struct SlideConditions {
    pub capable: bool,
    pub grounded: bool,
    pub wall: Option<WallSide>,
    pub descending: bool,
    pub dashing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideChange {
    Entered(WallSide),
    Left,
    Unchanged,
}

impl WallSlide {
    pub fn update(
        &mut self,
        conditions: SlideConditions,
        tuning: &WallTuning,
        ctx: &mut SimContext<'_>,
    ) -> SlideChange {
        let side = conditions.wall.filter(|_| {
            conditions.capable
                && !conditions.grounded
                && conditions.descending
                && !conditions.dashing
        });

        match (self.active, side) {
            (false, Some(side)) => {
                self.active = true;
                self.side = Some(side);
                self.stick.start(tuning.stick_time);
                ctx.effect(EffectId::WallSlide);
                SlideChange::Entered(side)
            }
            (true, None) => {
                self.stop(ctx);
                SlideChange::Left
            }
            (true, Some(side)) => {
                self.side = Some(side);
                SlideChange::Unchanged
            }
            (false, None) => SlideChange::Unchanged,
        }
    }

    pub fn stop(&mut self, ctx: &mut SimContext<'_>) {
        if self.active {
            ctx.stop_effect(EffectId::WallSlide);
        }
        self.active = false;
        self.side = None;
        self.stick.clear();
    }

    pub fn is_stuck(&self) -> bool {
        self.active && self.stick.is_active()
    }
}

/// Vertical speed while sliding, eased toward the capped slide speed.
pub fn slide_velocity(vy: f32, fast_dropping: bool, tuning: &WallTuning, dt: f32) -> f32 {
    let cap = if fast_dropping {
        tuning.slide_speed * tuning.fast_drop_slide_multiplier
    } else {
        tuning.slide_speed
    };
    lerp(vy, -cap, tuning.slide_lerp * dt)
}

/// Launch velocity up and away from `wall`.
pub fn wall_jump_velocity(wall: WallSide, tuning: &WallTuning) -> Vec2 {
    Vec2::new(
        wall.away().sign() * tuning.jump_horizontal,
        tuning.jump_vertical,
    )
}
