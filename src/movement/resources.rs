//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::controller::{AbilityFlags, InputSnapshot, InputSource};

/// All controller tuning, grouped by the module that reads it.
/// Loaded from `assets/data/controller.ron`; every section falls back to its defaults.
#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub body: BodyTuning,
    pub probe: ProbeTuning,
    pub run: RunTuning,
    pub gravity: GravityTuning,
    pub jump: JumpTuning,
    pub wall: WallTuning,
    pub dash: DashTuning,
    pub fast_drop: FastDropTuning,
    pub step_climb: StepClimbTuning,
    pub platform: PlatformTuning,
    pub health: HealthTuning,
    pub landing: LandingTuning,
    pub camera: CameraTuning,
    /// Abilities the player spawns with
    pub starting_abilities: AbilityFlags,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BodyTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 48.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeTuning {
    /// Feet box width as a fraction of the body width
    pub feet_width_scale: f32,
    /// Feet box height, centred on the feet anchor
    pub feet_depth: f32,
    /// Extra reach of the wall rays past the body edge
    pub wall_skin: f32,
    /// Horizontal offset of the ledge rays past the feet box
    pub ledge_offset: f32,
    /// How far down a ledge ray looks for ground
    pub ledge_lookahead: f32,
    /// Reach of the airborne ground-below ray (camera framing only)
    pub ground_below_distance: f32,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            feet_width_scale: 0.9,
            feet_depth: 4.0,
            wall_skin: 2.0,
            ledge_offset: 4.0,
            ledge_lookahead: 24.0,
            ground_below_distance: 400.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunTuning {
    pub max_move_speed: f32,
    pub air_speed: f32,
    pub air_run_speed: f32,
    pub running_threshold: f32,
    /// Below this speed the fast acceleration tier applies
    pub acceleration_threshold: f32,
    /// Lerp rates per second
    pub fast_acceleration: f32,
    pub slow_acceleration: f32,
    pub ground_friction: f32,
    pub platform_friction: f32,
    pub air_friction: f32,
    /// Speeds below this snap to zero while decaying
    pub stop_epsilon: f32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            max_move_speed: 320.0,
            air_speed: 260.0,
            air_run_speed: 340.0,
            running_threshold: 200.0,
            acceleration_threshold: 160.0,
            fast_acceleration: 18.0,
            slow_acceleration: 9.0,
            ground_friction: 20.0,
            platform_friction: 6.0,
            air_friction: 4.0,
            stop_epsilon: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GravityTuning {
    pub gravity: f32,
    /// Gravity multiplier while moving downward
    pub fall_multiplier: f32,
    pub max_fall_speed: f32,
    pub fast_fall_threshold: f32,
    pub max_fall_shake: ShakeTuning,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            fall_multiplier: 1.6,
            max_fall_speed: 900.0,
            fast_fall_threshold: 600.0,
            max_fall_shake: ShakeTuning {
                duration: 0.25,
                magnitude: 2.0,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTuning {
    pub jump_force: f32,
    /// Applied once to upward velocity when jump is released early
    pub variable_jump_multiplier: f32,
    /// How long a jump press stays live waiting for eligibility
    pub hold_jump_down_buffer: f32,
    pub coyote_jump_buffer: f32,
    pub max_air_jumps: u32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            jump_force: 680.0,
            variable_jump_multiplier: 0.5,
            hold_jump_down_buffer: 0.12,
            coyote_jump_buffer: 0.1,
            max_air_jumps: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WallTuning {
    pub slide_speed: f32,
    /// Lerp rate toward the slide speed, per second
    pub slide_lerp: f32,
    pub fast_drop_slide_multiplier: f32,
    /// Window after latching during which walking off the wall is ignored
    pub stick_time: f32,
    /// Push away from the wall
    pub jump_horizontal: f32,
    pub jump_vertical: f32,
    pub stun_time: f32,
    pub contact_resets_air_jumps: bool,
}

impl Default for WallTuning {
    fn default() -> Self {
        Self {
            slide_speed: 120.0,
            slide_lerp: 12.0,
            fast_drop_slide_multiplier: 2.0,
            stick_time: 0.15,
            jump_horizontal: 420.0,
            jump_vertical: 640.0,
            stun_time: 0.15,
            contact_resets_air_jumps: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashTuning {
    pub max_dashes: u32,
    pub dash_force: f32,
    /// Upward kick added when dashing from the ground
    pub ground_kick: f32,
    /// How long the dash keeps platform-tier friction
    pub duration: f32,
    pub cooldown_duration: f32,
    pub invincibility_time: f32,
    pub stun_time: f32,
    pub input_buffer: f32,
    pub shake: ShakeTuning,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            max_dashes: 1,
            dash_force: 900.0,
            ground_kick: 120.0,
            duration: 0.18,
            cooldown_duration: 0.6,
            invincibility_time: 0.2,
            stun_time: 0.18,
            input_buffer: 0.1,
            shake: ShakeTuning {
                duration: 0.1,
                magnitude: 3.0,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FastDropTuning {
    /// Extra downward acceleration while holding down
    pub acceleration: f32,
    /// Allow fast-drop while grounded too
    pub anywhere: bool,
    /// Vertical axis value that counts as holding down
    pub axis_threshold: f32,
}

impl Default for FastDropTuning {
    fn default() -> Self {
        Self {
            acceleration: 2400.0,
            anywhere: false,
            axis_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StepClimbTuning {
    pub enabled: bool,
    pub step_height: f32,
    pub forward_step: f32,
    /// Reach of the foot probes past the body edge
    pub probe_reach: f32,
    /// Height above the feet of the lower ray, so the floor itself is not hit
    pub foot_clearance: f32,
}

impl Default for StepClimbTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            step_height: 10.0,
            forward_step: 4.0,
            probe_reach: 4.0,
            foot_clearance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformTuning {
    /// Lerp rate per second at which carried momentum fades after leaving a platform
    pub decay_rate: f32,
    pub epsilon: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            decay_rate: 3.0,
            epsilon: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthTuning {
    pub max_health: i32,
    pub invincibility_time: f32,
    pub hurt_stun_time: f32,
    pub death_time: f32,
    /// Falling below this height kills the player
    pub kill_plane_y: f32,
    pub hurt_shake: ShakeTuning,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            max_health: 3,
            invincibility_time: 1.0,
            hurt_stun_time: 0.25,
            death_time: 1.2,
            kill_plane_y: -2000.0,
            hurt_shake: ShakeTuning {
                duration: 0.2,
                magnitude: 6.0,
            },
        }
    }
}

/// Landing impact thresholds and per-tier camera shake.
/// Tuned by feel; the numbers have no derivation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LandingTuning {
    pub low_speed: f32,
    pub high_speed: f32,
    pub low_shake: ShakeTuning,
    pub high_shake: ShakeTuning,
    pub fast_fall_shake: ShakeTuning,
    pub max_fall_shake: ShakeTuning,
    pub fall_damage: i32,
}

impl Default for LandingTuning {
    fn default() -> Self {
        Self {
            low_speed: 250.0,
            high_speed: 450.0,
            low_shake: ShakeTuning {
                duration: 0.05,
                magnitude: 1.0,
            },
            high_shake: ShakeTuning {
                duration: 0.1,
                magnitude: 2.5,
            },
            fast_fall_shake: ShakeTuning {
                duration: 0.15,
                magnitude: 4.0,
            },
            max_fall_shake: ShakeTuning {
                duration: 0.3,
                magnitude: 8.0,
            },
            fall_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraTuning {
    pub look_ahead: f32,
    pub run_look_ahead: f32,
    pub fall_look_down: f32,
    pub max_fall_look_down: f32,
    pub ledge_peek: f32,
    pub base_zoom: f32,
    pub run_zoom: f32,
    pub fall_zoom: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            look_ahead: 60.0,
            run_look_ahead: 110.0,
            fall_look_down: 120.0,
            max_fall_look_down: 200.0,
            ledge_peek: 48.0,
            base_zoom: 1.0,
            run_zoom: 1.08,
            fall_zoom: 1.12,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ShakeTuning {
    pub duration: f32,
    pub magnitude: f32,
}

impl MovementTuning {
    /// Calculate the maximum height reachable from a single ground jump.
    /// Uses physics formula: h = v² / (2g)
    pub fn single_jump_height(&self) -> f32 {
        self.jump.jump_force * self.jump.jump_force / (2.0 * self.gravity.gravity)
    }

    /// Height reachable with every air jump spent at the apex.
    pub fn max_reachable_height(&self) -> f32 {
        self.single_jump_height() * (1.0 + self.jump.max_air_jumps as f32)
    }
}

/// Raw per-frame input, written by the keyboard sampler.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
    pub restart_just_pressed: bool,
}

impl InputSource for MovementInput {
    fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            horizontal: self.axis.x,
            vertical: self.axis.y,
            jump_pressed: self.jump_just_pressed,
            jump_held: self.jump_held,
            jump_released: self.jump_just_released,
            dash_pressed: self.dash_just_pressed,
            restart_pressed: self.restart_just_pressed,
        }
    }
}
