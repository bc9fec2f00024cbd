//! Collision prober: classifies this step's contact state from world queries.

use bevy::math::Vec2;

use super::body::{CharacterBody, WallSide};
use super::context::{PhysicsWorld, ProbeMask};
use crate::movement::resources::ProbeTuning;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactSnapshot {
    pub grounded: bool,
    pub on_platform: bool,
    pub wall_left: bool,
    pub wall_right: bool,
    /// Only evaluated while grounded
    pub ledge_left: bool,
    pub ledge_right: bool,
    /// Distance from the feet to the ground, only evaluated while airborne
    pub ground_below: Option<f32>,
}

impl ContactSnapshot {
    /// The touched wall, when exactly one side is touching.
    pub fn wall_side(&self) -> Option<WallSide> {
        match (self.wall_left, self.wall_right) {
            (true, false) => Some(WallSide::Left),
            (false, true) => Some(WallSide::Right),
            _ => None,
        }
    }

    pub fn touching_wall(&self) -> bool {
        self.wall_left || self.wall_right
    }
}

pub fn probe_contacts(
    body: &CharacterBody,
    tuning: &ProbeTuning,
    world: &dyn PhysicsWorld,
) -> ContactSnapshot {
    let half = body.half_size();
    let feet = body.feet();
    let feet_half = Vec2::new(half.x * tuning.feet_width_scale, tuning.feet_depth * 0.5);

    let grounded = world.overlap_box(feet, feet_half, ProbeMask::Solid);
    let on_platform = grounded && world.overlap_box(feet, feet_half, ProbeMask::Platform);

    let wall_reach = half.x + tuning.wall_skin;
    let wall_left = world
        .raycast(body.position, Vec2::NEG_X, wall_reach, ProbeMask::Solid)
        .is_some();
    let wall_right = world
        .raycast(body.position, Vec2::X, wall_reach, ProbeMask::Solid)
        .is_some();

    let mut snapshot = ContactSnapshot {
        grounded,
        on_platform,
        wall_left,
        wall_right,
        ..Default::default()
    };

    if grounded {
        let offset = feet_half.x + tuning.ledge_offset;
        // Rays start slightly above the feet so ground we stand on is found.
        let lift = Vec2::new(0.0, tuning.feet_depth * 0.5);
        let reach = tuning.ledge_lookahead + tuning.feet_depth * 0.5;
        snapshot.ledge_left = world
            .raycast(
                feet + lift - Vec2::new(offset, 0.0),
                Vec2::NEG_Y,
                reach,
                ProbeMask::Solid,
            )
            .is_none();
        snapshot.ledge_right = world
            .raycast(
                feet + lift + Vec2::new(offset, 0.0),
                Vec2::NEG_Y,
                reach,
                ProbeMask::Solid,
            )
            .is_none();
    } else {
        snapshot.ground_below = world
            .raycast(
                feet,
                Vec2::NEG_Y,
                tuning.ground_below_distance,
                ProbeMask::Solid,
            )
            .map(|hit| hit.distance);
    }

    snapshot
}
