//! Range checks for loaded tuning. Out-of-range values are clamped once at
//! load time so the controller never has to guard against them per step.

use crate::movement::MovementTuning;

/// A tuning value that was clamped into its valid range.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub original: f32,
    pub clamped: f32,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' out of range: {} clamped to {}",
            self.field, self.original, self.clamped
        )
    }
}

/// Helper macro for clamping one float field
macro_rules! clamp_field {
    ($warnings:expr, $value:expr, $field:expr, $min:expr, $max:expr) => {
        let original = $value;
        let clamped = if original.is_nan() {
            $min
        } else {
            original.clamp($min, $max)
        };
        if clamped != original || original.is_nan() {
            $value = clamped;
            $warnings.push(ConfigWarning {
                field: $field,
                original,
                clamped,
            });
        }
    };
}

/// Clamps every out-of-range value and reports what changed.
/// Body size is left alone; an unusable body is a setup error instead.
pub fn sanitize_tuning(tuning: &mut MovementTuning) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let inf = f32::INFINITY;

    let probe = &mut tuning.probe;
    clamp_field!(warnings, probe.feet_width_scale, "probe.feet_width_scale", 0.1, 1.0);
    clamp_field!(warnings, probe.feet_depth, "probe.feet_depth", 0.5, inf);
    clamp_field!(warnings, probe.wall_skin, "probe.wall_skin", 0.0, inf);
    clamp_field!(warnings, probe.ledge_offset, "probe.ledge_offset", 0.0, inf);
    clamp_field!(warnings, probe.ledge_lookahead, "probe.ledge_lookahead", 0.0, inf);
    clamp_field!(warnings, probe.ground_below_distance, "probe.ground_below_distance", 0.0, inf);

    let run = &mut tuning.run;
    clamp_field!(warnings, run.max_move_speed, "run.max_move_speed", 0.0, inf);
    clamp_field!(warnings, run.air_speed, "run.air_speed", 0.0, inf);
    clamp_field!(warnings, run.air_run_speed, "run.air_run_speed", 0.0, inf);
    clamp_field!(warnings, run.running_threshold, "run.running_threshold", 0.0, inf);
    clamp_field!(warnings, run.acceleration_threshold, "run.acceleration_threshold", 0.0, inf);
    clamp_field!(warnings, run.fast_acceleration, "run.fast_acceleration", 0.0, inf);
    clamp_field!(warnings, run.slow_acceleration, "run.slow_acceleration", 0.0, inf);
    clamp_field!(warnings, run.ground_friction, "run.ground_friction", 0.0, inf);
    clamp_field!(warnings, run.platform_friction, "run.platform_friction", 0.0, inf);
    clamp_field!(warnings, run.air_friction, "run.air_friction", 0.0, inf);
    clamp_field!(warnings, run.stop_epsilon, "run.stop_epsilon", 0.0, inf);

    let gravity = &mut tuning.gravity;
    clamp_field!(warnings, gravity.gravity, "gravity.gravity", 1.0, inf);
    clamp_field!(warnings, gravity.fall_multiplier, "gravity.fall_multiplier", 0.0, inf);
    clamp_field!(warnings, gravity.max_fall_speed, "gravity.max_fall_speed", 1.0, inf);
    clamp_field!(warnings, gravity.fast_fall_threshold, "gravity.fast_fall_threshold", 0.0, inf);

    let jump = &mut tuning.jump;
    clamp_field!(warnings, jump.jump_force, "jump.jump_force", 0.0, inf);
    clamp_field!(warnings, jump.variable_jump_multiplier, "jump.variable_jump_multiplier", 0.0, 1.0);
    clamp_field!(warnings, jump.hold_jump_down_buffer, "jump.hold_jump_down_buffer", 0.0, inf);
    clamp_field!(warnings, jump.coyote_jump_buffer, "jump.coyote_jump_buffer", 0.0, inf);

    let wall = &mut tuning.wall;
    clamp_field!(warnings, wall.slide_speed, "wall.slide_speed", 0.0, inf);
    clamp_field!(warnings, wall.slide_lerp, "wall.slide_lerp", 0.0, inf);
    clamp_field!(warnings, wall.fast_drop_slide_multiplier, "wall.fast_drop_slide_multiplier", 1.0, inf);
    clamp_field!(warnings, wall.stick_time, "wall.stick_time", 0.0, inf);
    clamp_field!(warnings, wall.stun_time, "wall.stun_time", 0.0, inf);

    let dash = &mut tuning.dash;
    clamp_field!(warnings, dash.dash_force, "dash.dash_force", 0.0, inf);
    clamp_field!(warnings, dash.ground_kick, "dash.ground_kick", 0.0, inf);
    clamp_field!(warnings, dash.duration, "dash.duration", 0.0, inf);
    clamp_field!(warnings, dash.cooldown_duration, "dash.cooldown_duration", 0.0, inf);
    clamp_field!(warnings, dash.invincibility_time, "dash.invincibility_time", 0.0, inf);
    clamp_field!(warnings, dash.stun_time, "dash.stun_time", 0.0, inf);
    clamp_field!(warnings, dash.input_buffer, "dash.input_buffer", 0.0, inf);

    let fast_drop = &mut tuning.fast_drop;
    clamp_field!(warnings, fast_drop.acceleration, "fast_drop.acceleration", 0.0, inf);
    clamp_field!(warnings, fast_drop.axis_threshold, "fast_drop.axis_threshold", 0.0, 1.0);

    let step_climb = &mut tuning.step_climb;
    clamp_field!(warnings, step_climb.step_height, "step_climb.step_height", 0.0, inf);
    clamp_field!(warnings, step_climb.forward_step, "step_climb.forward_step", 0.0, inf);
    clamp_field!(warnings, step_climb.probe_reach, "step_climb.probe_reach", 0.0, inf);
    clamp_field!(
        warnings,
        step_climb.foot_clearance,
        "step_climb.foot_clearance",
        0.0,
        step_climb.step_height
    );

    let platform = &mut tuning.platform;
    clamp_field!(warnings, platform.decay_rate, "platform.decay_rate", 0.0, inf);
    clamp_field!(warnings, platform.epsilon, "platform.epsilon", 0.0, inf);

    let health = &mut tuning.health;
    if health.max_health < 1 {
        warnings.push(ConfigWarning {
            field: "health.max_health",
            original: health.max_health as f32,
            clamped: 1.0,
        });
        health.max_health = 1;
    }
    clamp_field!(warnings, health.invincibility_time, "health.invincibility_time", 0.0, inf);
    clamp_field!(warnings, health.hurt_stun_time, "health.hurt_stun_time", 0.0, inf);
    clamp_field!(warnings, health.death_time, "health.death_time", 0.0, inf);

    let landing = &mut tuning.landing;
    clamp_field!(warnings, landing.low_speed, "landing.low_speed", 0.0, inf);
    let low_speed = landing.low_speed;
    clamp_field!(warnings, landing.high_speed, "landing.high_speed", low_speed, inf);
    if landing.fall_damage < 0 {
        warnings.push(ConfigWarning {
            field: "landing.fall_damage",
            original: landing.fall_damage as f32,
            clamped: 0.0,
        });
        landing.fall_damage = 0;
    }

    let camera = &mut tuning.camera;
    clamp_field!(warnings, camera.base_zoom, "camera.base_zoom", 0.1, inf);
    clamp_field!(warnings, camera.run_zoom, "camera.run_zoom", 0.1, inf);
    clamp_field!(warnings, camera.fall_zoom, "camera.fall_zoom", 0.1, inf);
    clamp_field!(warnings, camera.fall_look_down, "camera.fall_look_down", 0.0, inf);
    clamp_field!(warnings, camera.max_fall_look_down, "camera.max_fall_look_down", 0.0, inf);

    warnings
}
