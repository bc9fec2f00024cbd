//! Jump state machine: coyote time, air-jump budget and the jump cut.

use bevy::math::Vec2;

use crate::movement::resources::JumpTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Wall,
    Air,
}

/// Which phase the jump machine is in, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    GroundedReady,
    AirborneCanCoyote,
    AirborneNoCoyote,
    Jumping,
    JumpCut,
}

#[derive(Debug, Clone, Default)]
pub struct JumpBudget {
    pub remaining_air_jumps: u32,
    pub is_jump_cut: bool,
    /// How long jump has been held during the current jump
    pub jump_held_duration: f32,
    pub coyote_timer: f32,
    pub coyote_eligible: bool,
    pub is_jumping: bool,
}

impl JumpBudget {
    pub fn new(tuning: &JumpTuning) -> Self {
        // The coyote window only opens on a grounded touch.
        Self {
            remaining_air_jumps: tuning.max_air_jumps,
            ..Default::default()
        }
    }

    pub fn phase(&self, grounded: bool) -> JumpPhase {
        if self.is_jumping {
            if self.is_jump_cut {
                JumpPhase::JumpCut
            } else {
                JumpPhase::Jumping
            }
        } else if grounded {
            JumpPhase::GroundedReady
        } else if self.coyote_eligible {
            JumpPhase::AirborneCanCoyote
        } else {
            JumpPhase::AirborneNoCoyote
        }
    }

    /// Called every step the body rests on the ground.
    pub fn on_grounded(&mut self, tuning: &JumpTuning) {
        self.remaining_air_jumps = tuning.max_air_jumps;
        self.is_jump_cut = false;
        self.is_jumping = false;
        self.coyote_timer = tuning.coyote_jump_buffer;
        self.coyote_eligible = true;
    }

    /// Counts the coyote window down while airborne. Once it hits zero the
    /// window stays closed until the next grounded touch.
    pub fn tick_coyote(&mut self, dt: f32) {
        if !self.coyote_eligible {
            return;
        }
        self.coyote_timer -= dt;
        if self.coyote_timer <= 0.0 {
            self.coyote_timer = 0.0;
            self.coyote_eligible = false;
        }
    }

    pub fn can_ground_jump(&self, grounded: bool) -> bool {
        (grounded || self.coyote_eligible) && !self.is_jumping
    }

    /// `wall_blocks` is true when wall contact routes the jump to the wall-jump
    /// module instead.
    pub fn can_air_jump(&self, grounded: bool, double_jump: bool, wall_blocks: bool) -> bool {
        !grounded
            && double_jump
            && !self.coyote_eligible
            && self.remaining_air_jumps > 0
            && !wall_blocks
    }

    pub fn begin_jump(&mut self, kind: JumpKind) {
        if kind == JumpKind::Air {
            self.remaining_air_jumps = self.remaining_air_jumps.saturating_sub(1);
        }
        self.is_jumping = true;
        self.is_jump_cut = false;
        self.jump_held_duration = 0.0;
        self.coyote_eligible = false;
        self.coyote_timer = 0.0;
    }

    /// Applies the jump cut at most once per jump. Returns the new vertical
    /// speed when the cut happened.
    pub fn try_cut(&mut self, vy: f32, multiplier: f32) -> Option<f32> {
        if !self.is_jumping || self.is_jump_cut || vy <= 0.0 {
            return None;
        }
        self.is_jump_cut = true;
        Some(vy * multiplier)
    }

    pub fn track_hold(&mut self, held: bool, dt: f32) {
        if self.is_jumping && held && !self.is_jump_cut {
            self.jump_held_duration += dt;
        }
    }

    pub fn refill(&mut self, max_air_jumps: u32) {
        self.remaining_air_jumps = max_air_jumps;
    }
}

/// Velocity right after a ground or air jump. When the body was moving against
/// the held direction, horizontal speed snaps to the jump force that way.
pub fn launch_velocity(velocity: Vec2, intent: f32, jump_force: f32) -> Vec2 {
    let opposed = intent != 0.0 && velocity.x != 0.0 && velocity.x.signum() != intent.signum();
    let x = if opposed {
        jump_force * intent.signum()
    } else {
        velocity.x
    };
    Vec2::new(x, jump_force)
}
