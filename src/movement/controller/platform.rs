//! Moving-platform momentum: full carry while attached, exponential fade after.

use super::context::{BodyId, ContactEvent, PhysicsWorld};
use super::locomotion::lerp;
use crate::movement::resources::PlatformTuning;

#[derive(Debug, Clone, Default)]
pub struct PlatformMomentum {
    /// Not owned; looked up through the physics world each step
    pub body: Option<BodyId>,
    pub on_ground_object: bool,
    pub last_velocity_x: f32,
    /// Set on the step contact was lost; that step keeps the full velocity
    just_left: bool,
}

impl PlatformMomentum {
    pub fn handle_event(&mut self, event: &ContactEvent) {
        match *event {
            ContactEvent::BodyEntered(body) => {
                self.body = Some(body);
                self.on_ground_object = true;
                self.just_left = false;
            }
            ContactEvent::BodyExited(body) => {
                if self.body == Some(body) {
                    self.detach();
                }
            }
            ContactEvent::Hazard { .. } => {}
        }
    }

    fn detach(&mut self) {
        self.body = None;
        self.on_ground_object = false;
        self.just_left = true;
    }

    /// Refreshes the carried velocity. While attached it mirrors the platform
    /// exactly; a platform that vanished counts as stepping off.
    pub fn update(&mut self, world: &dyn PhysicsWorld, tuning: &PlatformTuning, dt: f32) {
        if self.on_ground_object {
            match self.body.and_then(|body| world.body_velocity(body)) {
                Some(velocity) => {
                    self.last_velocity_x = velocity.x;
                    return;
                }
                None => self.detach(),
            }
        }
        if self.just_left {
            self.just_left = false;
            return;
        }
        if self.last_velocity_x != 0.0 {
            self.last_velocity_x = lerp(self.last_velocity_x, 0.0, tuning.decay_rate * dt);
            if self.last_velocity_x.abs() < tuning.epsilon {
                self.last_velocity_x = 0.0;
            }
        }
    }

    /// Horizontal velocity added on top of the character's own speed.
    pub fn contribution(&self) -> f32 {
        self.last_velocity_x
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Recovers the character's own horizontal speed from the solved engine
/// velocity. The carry is only taken back out of motion that still contains
/// it: when the solver stopped, slowed or reversed the body, the own speed can
/// shrink toward zero but never flip sign.
pub fn own_velocity_x(engine_vx: f32, own_vx: f32, carry: f32) -> f32 {
    if carry == 0.0 {
        return engine_vx;
    }
    let handed_out = own_vx + carry;
    let candidate = engine_vx - carry;
    let blocked = engine_vx == 0.0
        || engine_vx * handed_out < 0.0
        || engine_vx.abs() < handed_out.abs();
    if !blocked {
        return candidate;
    }
    if candidate * own_vx <= 0.0 {
        0.0
    } else if candidate.abs() > own_vx.abs() {
        own_vx
    } else {
        candidate
    }
}
