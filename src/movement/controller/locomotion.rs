//! Movement integrator: horizontal speed from intent, contact state and friction.

use super::context::{EffectId, SimContext};
use crate::movement::resources::RunTuning;

/// What the integrator needs to know about this step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Surface {
    pub grounded: bool,
    /// Standing on a platform, or mid-dash
    pub slippery: bool,
    /// Wall-stick window is open; the player cannot walk off the wall
    pub stuck_to_wall: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Locomotion {
    pub is_running: bool,
    /// Running state when the ground was last touched; picks the air speed
    pub was_running: bool,
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Next horizontal speed. `intent` is expected in [-1, 1].
pub fn integrate_horizontal(
    speed: f32,
    intent: f32,
    surface: Surface,
    was_running: bool,
    tuning: &RunTuning,
    dt: f32,
) -> f32 {
    if intent == 0.0 {
        let friction = if surface.slippery {
            tuning.platform_friction
        } else if surface.grounded {
            tuning.ground_friction
        } else {
            tuning.air_friction
        };
        let next = lerp(speed, 0.0, friction * dt);
        return if next.abs() < tuning.stop_epsilon {
            0.0
        } else {
            next
        };
    }

    let top_speed = if surface.grounded {
        tuning.max_move_speed
    } else if was_running {
        tuning.air_run_speed
    } else {
        tuning.air_speed
    };
    let target = if surface.stuck_to_wall {
        0.0
    } else {
        intent * top_speed
    };

    let rate = if speed.abs() < tuning.acceleration_threshold {
        tuning.fast_acceleration
    } else {
        tuning.slow_acceleration
    };
    lerp(speed, target, rate * dt)
}

impl Locomotion {
    /// Recomputes the running flag and plays or stops the running effects on
    /// the edge. Effects never feed back into the speed.
    pub fn update_running(
        &mut self,
        speed: f32,
        grounded: bool,
        tuning: &RunTuning,
        ctx: &mut SimContext<'_>,
    ) {
        let running = grounded && speed.abs() > tuning.running_threshold;
        if running != self.is_running {
            if running {
                ctx.effect(EffectId::RunDust);
                ctx.effect(EffectId::MotionBlur);
            } else {
                ctx.stop_effect(EffectId::RunDust);
                ctx.stop_effect(EffectId::MotionBlur);
            }
            self.is_running = running;
        }
        if grounded {
            self.was_running = running;
        }
    }

    /// Drops running state and its effects, used on flips and respawns.
    pub fn cancel_running(&mut self, ctx: &mut SimContext<'_>) {
        if self.is_running {
            ctx.stop_effect(EffectId::RunDust);
            ctx.stop_effect(EffectId::MotionBlur);
        }
        self.is_running = false;
    }
}
