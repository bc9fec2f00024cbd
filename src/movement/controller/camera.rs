//! Camera offset projector: a pure mapping from movement state to framing.

use bevy::math::Vec2;

use super::body::Facing;
use crate::movement::resources::CameraTuning;

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInputs {
    pub facing: Facing,
    pub grounded: bool,
    pub is_running: bool,
    pub is_falling: bool,
    pub at_max_fall_speed: bool,
    /// Distance to ground while airborne, if any is in range
    pub ground_below: Option<f32>,
    pub ledge_ahead: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub offset: Vec2,
    pub zoom: f32,
}

pub fn project_camera(inputs: &CameraInputs, tuning: &CameraTuning) -> CameraFraming {
    let look_ahead = if inputs.is_running {
        tuning.run_look_ahead
    } else {
        tuning.look_ahead
    };
    let mut offset = Vec2::new(inputs.facing.sign() * look_ahead, 0.0);
    let mut zoom = tuning.base_zoom;

    if inputs.grounded {
        if inputs.ledge_ahead {
            offset.y = -tuning.ledge_peek;
        }
        if inputs.is_running {
            zoom = tuning.run_zoom;
        }
    } else if inputs.at_max_fall_speed {
        offset.y = -tuning.max_fall_look_down;
        zoom = tuning.fall_zoom;
    } else if inputs.is_falling {
        // Lean further down the farther the ground is, up to the cap.
        let look_down = match inputs.ground_below {
            Some(distance) => distance.min(tuning.fall_look_down),
            None => tuning.fall_look_down,
        };
        offset.y = -look_down;
    }

    CameraFraming { offset, zoom }
}
