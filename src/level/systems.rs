//! Level domain: moving platform driver.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::level::components::PlatformPath;
use crate::movement::MovingPlatform;

/// Closer than this counts as arrived
const ARRIVE_DISTANCE: f32 = 0.5;

/// Velocity that carries `position` toward `target` at `speed` without
/// overshooting within `dt`. Returns `None` once the target is reached.
pub(crate) fn waypoint_velocity(position: Vec2, target: Vec2, speed: f32, dt: f32) -> Option<Vec2> {
    let to_target = target - position;
    let distance = to_target.length();
    if distance <= ARRIVE_DISTANCE || speed <= 0.0 || dt <= 0.0 {
        return None;
    }
    let step_speed = speed.min(distance / dt);
    Some(to_target / distance * step_speed)
}

pub(crate) fn move_platforms(
    time: Res<Time>,
    mut query: Query<(&mut PlatformPath, &Position, &mut LinearVelocity), With<MovingPlatform>>,
) {
    let dt = time.delta_secs();
    for (mut path, position, mut velocity) in &mut query {
        let Some(target) = path.target_point() else {
            velocity.0 = Vec2::ZERO;
            continue;
        };
        match waypoint_velocity(position.0, target, path.speed, dt) {
            Some(v) => velocity.0 = v,
            None => {
                path.advance();
                velocity.0 = Vec2::ZERO;
            }
        }
    }
}
