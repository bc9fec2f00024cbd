//! Collaborator seams for the player simulation.
//!
//! The controller never reaches into the engine directly. Each step it is handed a
//! [`SimContext`] holding one implementation of every trait below; the Bevy systems
//! provide real ones, tests provide fakes.

use bevy::math::Vec2;

/// Per-step input snapshot. Edge flags are true only on the frame the edge happened.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub dash_pressed: bool,
    pub restart_pressed: bool,
}

pub trait InputSource {
    fn snapshot(&self) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn snapshot(&self) -> InputSnapshot {
        *self
    }
}

/// Which static layers a probe tests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMask {
    /// Ground and platforms
    Solid,
    /// Platforms only
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
}

/// Opaque handle to a rigid body owned by the physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u64);

/// Contacts reported by the physics world since the previous step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// Started touching a non-static rigid body
    BodyEntered(BodyId),
    BodyExited(BodyId),
    /// Touched something that hurts
    Hazard { damage: i32, knockback: Vec2 },
}

/// Read-only view of the physics world.
pub trait PhysicsWorld {
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: ProbeMask) -> bool;

    /// `direction` must be normalized.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: ProbeMask,
    ) -> Option<RayHit>;

    fn contact_events(&self) -> &[ContactEvent];

    /// Current velocity of a body, `None` once it no longer exists.
    fn body_velocity(&self, body: BodyId) -> Option<Vec2>;
}

pub trait CheckpointProvider {
    fn active_checkpoint_position(&self) -> Option<Vec2>;
    fn start_teleporter_position(&self) -> Option<Vec2>;
    fn default_spawn_position(&self) -> Vec2;
}

/// Visual effects the controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectId {
    RunDust,
    MotionBlur,
    JumpDust,
    AirJumpBurst,
    WallSlide,
    WallJumpBurst,
    DashTrail,
    LandLow,
    LandHigh,
    LandFastFall,
    LandMaxFall,
    MaxFallStreaks,
    HurtFlash,
    DamageTint,
    Bleeding,
    Shadow,
    DeathBurst,
    RespawnFlash,
}

impl EffectId {
    pub const ALL: [EffectId; 18] = [
        EffectId::RunDust,
        EffectId::MotionBlur,
        EffectId::JumpDust,
        EffectId::AirJumpBurst,
        EffectId::WallSlide,
        EffectId::WallJumpBurst,
        EffectId::DashTrail,
        EffectId::LandLow,
        EffectId::LandHigh,
        EffectId::LandFastFall,
        EffectId::LandMaxFall,
        EffectId::MaxFallStreaks,
        EffectId::HurtFlash,
        EffectId::DamageTint,
        EffectId::Bleeding,
        EffectId::Shadow,
        EffectId::DeathBurst,
        EffectId::RespawnFlash,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EffectId::RunDust => "run_dust",
            EffectId::MotionBlur => "motion_blur",
            EffectId::JumpDust => "jump_dust",
            EffectId::AirJumpBurst => "air_jump_burst",
            EffectId::WallSlide => "wall_slide",
            EffectId::WallJumpBurst => "wall_jump_burst",
            EffectId::DashTrail => "dash_trail",
            EffectId::LandLow => "land_low",
            EffectId::LandHigh => "land_high",
            EffectId::LandFastFall => "land_fast_fall",
            EffectId::LandMaxFall => "land_max_fall",
            EffectId::MaxFallStreaks => "max_fall_streaks",
            EffectId::HurtFlash => "hurt_flash",
            EffectId::DamageTint => "damage_tint",
            EffectId::Bleeding => "bleeding",
            EffectId::Shadow => "shadow",
            EffectId::DeathBurst => "death_burst",
            EffectId::RespawnFlash => "respawn_flash",
        }
    }
}

/// Sounds the controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    AirJump,
    WallJump,
    Dash,
    LandSoft,
    LandHard,
    LandHeavy,
    Hurt,
    Death,
    Respawn,
}

impl SoundId {
    pub const ALL: [SoundId; 10] = [
        SoundId::Jump,
        SoundId::AirJump,
        SoundId::WallJump,
        SoundId::Dash,
        SoundId::LandSoft,
        SoundId::LandHard,
        SoundId::LandHeavy,
        SoundId::Hurt,
        SoundId::Death,
        SoundId::Respawn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SoundId::Jump => "jump",
            SoundId::AirJump => "air_jump",
            SoundId::WallJump => "wall_jump",
            SoundId::Dash => "dash",
            SoundId::LandSoft => "land_soft",
            SoundId::LandHard => "land_hard",
            SoundId::LandHeavy => "land_heavy",
            SoundId::Hurt => "hurt",
            SoundId::Death => "death",
            SoundId::Respawn => "respawn",
        }
    }
}

/// Fire-and-forget visual effects. Implementations must tolerate unknown ids.
pub trait EffectSink {
    fn play_effect(&mut self, effect: EffectId);
    fn stop_effect(&mut self, effect: EffectId);
}

pub trait SoundSink {
    fn play_sound(&mut self, sound: SoundId);
}

pub trait CameraSink {
    fn shake(&mut self, duration: f32, magnitude: f32);
    fn set_offset(&mut self, offset: Vec2);
    fn set_zoom(&mut self, zoom: f32);
}

pub trait GameStateSource {
    fn is_gameplay_active(&self) -> bool;
}

impl GameStateSource for bool {
    fn is_gameplay_active(&self) -> bool {
        *self
    }
}

/// Everything a fixed step may touch outside the controller.
pub struct SimContext<'a> {
    pub world: &'a dyn PhysicsWorld,
    pub checkpoints: &'a dyn CheckpointProvider,
    pub effects: &'a mut dyn EffectSink,
    pub sounds: &'a mut dyn SoundSink,
    pub camera: &'a mut dyn CameraSink,
    pub game_state: &'a dyn GameStateSource,
}

impl SimContext<'_> {
    pub fn effect(&mut self, effect: EffectId) {
        self.effects.play_effect(effect);
    }

    pub fn stop_effect(&mut self, effect: EffectId) {
        self.effects.stop_effect(effect);
    }

    pub fn sound(&mut self, sound: SoundId) {
        self.sounds.play_sound(sound);
    }

    /// Zero-length or zero-strength shakes are dropped.
    pub fn shake(&mut self, duration: f32, magnitude: f32) {
        if duration > 0.0 && magnitude > 0.0 {
            self.camera.shake(duration, magnitude);
        }
    }
}
