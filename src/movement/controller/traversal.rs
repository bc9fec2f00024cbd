//! Fast-drop and step-climb.

use bevy::math::Vec2;

use super::body::CharacterBody;
use super::context::{PhysicsWorld, ProbeMask};
use crate::movement::resources::{FastDropTuning, StepClimbTuning};

pub fn wants_fast_drop(vertical: f32, grounded: bool, tuning: &FastDropTuning) -> bool {
    vertical <= -tuning.axis_threshold && (!grounded || tuning.anywhere)
}

/// Extra downward speed from holding down, skipped once at the fall cap.
pub fn fast_drop_velocity(vy: f32, at_max_fall: bool, tuning: &FastDropTuning, dt: f32) -> f32 {
    if at_max_fall {
        vy
    } else {
        vy - tuning.acceleration * dt
    }
}

/// Displacement that lifts the body onto a low step ahead, if there is one.
/// A probe at foot height must hit while the same probe raised by the step
/// height stays clear.
pub fn step_climb_offset(
    body: &CharacterBody,
    direction: f32,
    tuning: &StepClimbTuning,
    world: &dyn PhysicsWorld,
) -> Option<Vec2> {
    if !tuning.enabled || direction == 0.0 {
        return None;
    }
    let dir = Vec2::new(direction.signum(), 0.0);
    let reach = body.half_size().x + tuning.probe_reach;
    let low_origin = Vec2::new(body.position.x, body.feet().y + tuning.foot_clearance);
    let high_origin = low_origin + Vec2::new(0.0, tuning.step_height);

    let low = world.raycast(low_origin, dir, reach, ProbeMask::Solid);
    let high = world.raycast(high_origin, dir, reach, ProbeMask::Solid);

    match (low, high) {
        (Some(_), None) => Some(Vec2::new(
            dir.x * tuning.forward_step,
            tuning.step_height,
        )),
        _ => None,
    }
}
