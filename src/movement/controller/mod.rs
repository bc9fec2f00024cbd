//! Engine-agnostic player simulation.
//!
//! [`PlayerController`] owns every piece of per-player movement state and is
//! advanced in two halves: [`PlayerController::frame`] once per rendered frame
//! to sample input and age the input buffers, and [`PlayerController::step`]
//! once per fixed physics step. The controller does not integrate position;
//! the host's physics engine does that from [`PlayerController::output_velocity`]
//! and feeds the result back through [`PlayerController::sync_from_physics`].

mod abilities;
mod body;
mod camera;
mod context;
mod dash;
mod error;
mod gravity;
mod health;
mod input;
mod jump;
mod locomotion;
mod platform;
mod probe;
mod timers;
mod traversal;
mod wall;

#[cfg(test)]
mod tests;

pub use abilities::{Ability, AbilityFlags};
pub use body::{CharacterBody, Facing, PlayerState, WallSide};
pub use camera::{CameraFraming, CameraInputs, project_camera};
pub use context::{
    BodyId, CameraSink, CheckpointProvider, ContactEvent, EffectId, EffectSink,
    GameStateSource, InputSnapshot, InputSource, PhysicsWorld, ProbeMask, RayHit, SimContext,
    SoundId, SoundSink,
};
pub use dash::DashBudget;
pub use error::SetupError;
pub use gravity::{FallState, LandingTier};
pub use health::{DamageCause, DamageOutcome, HealthTracker};
pub use jump::{JumpBudget, JumpKind, JumpPhase};
pub use locomotion::Locomotion;
pub use platform::PlatformMomentum;
pub use probe::ContactSnapshot;
pub use timers::Countdown;
pub use wall::WallSlide;

use bevy::log::{debug, info};
use bevy::math::Vec2;

use gravity::{apply_gravity, clamp_fall, classify_landing};
use input::InputSampler;
use jump::launch_velocity;
use locomotion::{Surface, integrate_horizontal};
use probe::probe_contacts;
use traversal::{fast_drop_velocity, step_climb_offset, wants_fast_drop};
use wall::{SlideChange, SlideConditions, slide_velocity, wall_jump_velocity};

use crate::movement::resources::MovementTuning;

/// Where a respawn lands: the active checkpoint, else the start teleporter,
/// else the level's default spawn.
pub fn resolve_respawn(checkpoints: &dyn CheckpointProvider) -> Vec2 {
    checkpoints
        .active_checkpoint_position()
        .or_else(|| checkpoints.start_teleporter_position())
        .unwrap_or_else(|| checkpoints.default_spawn_position())
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    pub body: CharacterBody,
    pub abilities: AbilityFlags,
    pub jump: JumpBudget,
    pub dash: DashBudget,
    pub wall_slide: WallSlide,
    pub locomotion: Locomotion,
    pub fall: FallState,
    pub platform: PlatformMomentum,
    pub health: HealthTracker,
    tuning: MovementTuning,
    sampler: InputSampler,
    /// Seconds left on a buffered jump press
    jump_buffer: f32,
    dash_buffer: f32,
    was_grounded: bool,
    /// Position was set directly and must be pushed to the host
    teleported: bool,
}

impl PlayerController {
    pub fn new(
        spawn: Vec2,
        tuning: MovementTuning,
        abilities: AbilityFlags,
    ) -> Result<Self, SetupError> {
        let size = Vec2::new(tuning.body.width, tuning.body.height);
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(SetupError::InvalidBodySize {
                width: size.x,
                height: size.y,
            });
        }

        Ok(Self {
            body: CharacterBody::new(spawn, size),
            abilities,
            jump: JumpBudget::new(&tuning.jump),
            dash: DashBudget::new(&tuning.dash),
            wall_slide: WallSlide::default(),
            locomotion: Locomotion::default(),
            fall: FallState::default(),
            platform: PlatformMomentum::default(),
            health: HealthTracker::new(tuning.health.max_health),
            tuning,
            sampler: InputSampler::default(),
            jump_buffer: 0.0,
            dash_buffer: 0.0,
            was_grounded: false,
            teleported: false,
        })
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Swaps tuning in place. Body size is fixed after construction.
    pub fn set_tuning(&mut self, tuning: MovementTuning) {
        self.health.max = tuning.health.max_health.max(1);
        self.health.current = self.health.current.min(self.health.max);
        self.jump.remaining_air_jumps = self.jump.remaining_air_jumps.min(tuning.jump.max_air_jumps);
        self.dash.remaining = self.dash.remaining.min(tuning.dash.max_dashes);
        self.tuning = tuning;
    }

    pub fn jump_buffer(&self) -> f32 {
        self.jump_buffer
    }

    pub fn dash_buffer(&self) -> f32 {
        self.dash_buffer
    }

    /// Per-frame half: samples input, ages the buffers and the wall-stick
    /// window, then arms a buffer for every press seen this frame.
    pub fn frame(&mut self, input: &dyn InputSource, dt: f32) {
        let edges = self.sampler.sample(input.snapshot());

        self.jump_buffer = (self.jump_buffer - dt).max(0.0);
        self.dash_buffer = (self.dash_buffer - dt).max(0.0);
        self.wall_slide.stick.tick(dt);

        if edges.jump_pressed {
            self.jump_buffer = self.tuning.jump.hold_jump_down_buffer;
        }
        if edges.dash_pressed {
            self.dash_buffer = self.tuning.dash.input_buffer;
        }
    }

    /// One frame and one fixed step with the same `dt`.
    pub fn tick(&mut self, input: &dyn InputSource, ctx: &mut SimContext<'_>, dt: f32) {
        self.frame(input, dt);
        self.step(ctx, dt);
    }

    /// Fixed-step half.
    pub fn step(&mut self, ctx: &mut SimContext<'_>, dt: f32) {
        if !ctx.game_state.is_gameplay_active() {
            return;
        }

        // Hurt and death timers run even while frozen.
        if self.health.tick(dt, ctx) {
            self.respawn_from_checkpoint(ctx);
        }
        if self.body.state != PlayerState::Controllable {
            return;
        }

        let input = self.sampler.consume();
        if input.restart_pressed {
            info!("Restart requested");
            self.respawn_from_checkpoint(ctx);
            return;
        }

        let world = ctx.world;
        let contacts = probe_contacts(&self.body, &self.tuning.probe, world);
        self.body.contacts = contacts;
        let was_grounded = self.was_grounded;
        self.was_grounded = contacts.grounded;

        for event in world.contact_events() {
            self.platform.handle_event(event);
            if let ContactEvent::Hazard { damage, knockback } = *event {
                let outcome = self.damage(damage, true, DamageCause::Hazard, ctx);
                if outcome == DamageOutcome::Hurt {
                    self.body.velocity = knockback;
                }
            }
        }
        if self.body.state != PlayerState::Controllable {
            return;
        }

        if contacts.grounded && !was_grounded && self.fall.is_falling && !self.dash.is_dashing() {
            self.land(ctx);
            if self.body.state != PlayerState::Controllable {
                return;
            }
        }

        let grounded = contacts.grounded;
        if grounded && self.body.velocity.y <= 0.0 {
            self.body.velocity.y = 0.0;
            self.jump.on_grounded(&self.tuning.jump);
        } else if !grounded {
            self.jump.tick_coyote(dt);
        }

        let can_move = self.can_move();
        let intent = if can_move { input.horizontal } else { 0.0 };
        let fast_dropping =
            can_move && wants_fast_drop(input.vertical, grounded, &self.tuning.fast_drop);

        self.update_wall_slide(ctx);

        if can_move && !self.wall_slide.active {
            if let Some(facing) = Facing::from_axis(intent) {
                if facing != self.body.facing {
                    self.flip(ctx);
                }
            }
        }

        if can_move && self.jump_buffer > 0.0 {
            self.resolve_jump(intent, ctx);
        }
        if input.jump_released {
            let multiplier = self.tuning.jump.variable_jump_multiplier;
            if let Some(vy) = self.jump.try_cut(self.body.velocity.y, multiplier) {
                debug!("Jump cut: vy {:.1} -> {:.1}", self.body.velocity.y, vy);
                self.body.velocity.y = vy;
            }
        }
        self.jump.track_hold(input.jump_held, dt);

        if self.can_move() && self.dash_buffer > 0.0 && self.abilities.dash {
            self.try_dash(ctx);
        }

        // Horizontal
        let intent = if self.can_move() { intent } else { 0.0 };
        let surface = Surface {
            grounded,
            slippery: contacts.on_platform || self.dash.is_dashing(),
            stuck_to_wall: self.wall_slide.is_stuck(),
        };
        self.body.velocity.x = integrate_horizontal(
            self.body.velocity.x,
            intent,
            surface,
            self.locomotion.was_running,
            &self.tuning.run,
            dt,
        );
        self.locomotion
            .update_running(self.body.velocity.x, grounded, &self.tuning.run, ctx);

        if (grounded || self.dash.is_dashing()) && !self.wall_slide.active {
            let offset = step_climb_offset(
                &self.body,
                self.body.velocity.x,
                &self.tuning.step_climb,
                world,
            );
            if let Some(offset) = offset {
                debug!("Step climb by ({:.1}, {:.1})", offset.x, offset.y);
                self.body.position += offset;
                self.teleported = true;
            }
        }

        // Vertical
        let resting = grounded && self.body.velocity.y <= 0.0;
        let mut vy = self.body.velocity.y;
        if self.wall_slide.active {
            vy = slide_velocity(vy, fast_dropping, &self.tuning.wall, dt);
        } else {
            if !resting {
                vy = apply_gravity(vy, &self.tuning.gravity, dt);
            }
            if fast_dropping {
                vy = fast_drop_velocity(
                    vy,
                    self.fall.at_max_fall_speed,
                    &self.tuning.fast_drop,
                    dt,
                );
            }
        }
        self.body.velocity.y = clamp_fall(vy, &self.tuning.gravity);

        self.fall.update(self.body.velocity.y, &self.tuning.gravity, ctx);

        let restored = self.dash.tick(&self.tuning.dash, dt);
        if restored > 0 {
            debug!("Dash refilled: {} of {}", self.dash.remaining, self.tuning.dash.max_dashes);
        }

        self.platform.update(world, &self.tuning.platform, dt);

        if self.body.position.y < self.tuning.health.kill_plane_y {
            self.kill(DamageCause::OutOfBounds, ctx);
            return;
        }

        let framing = self.camera_framing();
        ctx.camera.set_offset(framing.offset);
        ctx.camera.set_zoom(framing.zoom);
    }

    fn update_wall_slide(&mut self, ctx: &mut SimContext<'_>) {
        let conditions = SlideConditions {
            capable: self.abilities.wall_slide,
            grounded: self.body.contacts.grounded,
            wall: self.body.contacts.wall_side(),
            descending: self.body.velocity.y < 0.0,
            dashing: self.dash.is_dashing(),
        };
        if let SlideChange::Entered(side) = self.wall_slide.update(conditions, &self.tuning.wall, ctx)
        {
            debug!("Wall slide started on {:?} wall", side);
            if self.tuning.wall.contact_resets_air_jumps {
                self.jump.refill(self.tuning.jump.max_air_jumps);
            }
        }

        if let Some(side) = self.wall_slide.side.filter(|_| self.wall_slide.active) {
            if self.body.facing != side.away() {
                self.flip(ctx);
            }
        }
    }

    /// Tries ground (or coyote), wall and air jumps in that order. The buffer
    /// is only spent when one of them happens.
    fn resolve_jump(&mut self, intent: f32, ctx: &mut SimContext<'_>) {
        let contacts = self.body.contacts;
        let grounded = contacts.grounded;
        let wall = contacts.wall_side().filter(|_| !grounded && self.abilities.wall_jump);
        let wall_blocks = self.abilities.wall_jump && contacts.touching_wall();

        if self.jump.can_ground_jump(grounded) {
            self.body.velocity =
                launch_velocity(self.body.velocity, intent, self.tuning.jump.jump_force);
            self.jump.begin_jump(JumpKind::Ground);
            ctx.effect(EffectId::JumpDust);
            ctx.sound(SoundId::Jump);
            debug!("Jump: ground, vx {:.1}", self.body.velocity.x);
        } else if let Some(side) = wall {
            self.body.velocity = wall_jump_velocity(side, &self.tuning.wall);
            self.wall_slide.stop(ctx);
            if self.body.facing != side.away() {
                self.flip(ctx);
            }
            self.health.stun_lock.start(self.tuning.wall.stun_time);
            self.jump.begin_jump(JumpKind::Wall);
            ctx.effect(EffectId::WallJumpBurst);
            ctx.sound(SoundId::WallJump);
            debug!("Jump: wall, off {:?} wall", side);
        } else if self
            .jump
            .can_air_jump(grounded, self.abilities.double_jump, wall_blocks)
        {
            self.body.velocity =
                launch_velocity(self.body.velocity, intent, self.tuning.jump.jump_force);
            self.jump.begin_jump(JumpKind::Air);
            ctx.effect(EffectId::AirJumpBurst);
            ctx.sound(SoundId::AirJump);
            debug!(
                "Jump: air, {} air jumps left",
                self.jump.remaining_air_jumps
            );
        } else {
            return;
        }
        self.jump_buffer = 0.0;
    }

    fn try_dash(&mut self, ctx: &mut SimContext<'_>) {
        let tuning = &self.tuning.dash;
        if !self.dash.consume(tuning) {
            return;
        }
        self.dash_buffer = 0.0;

        self.body.velocity.x = self.body.facing.sign() * tuning.dash_force;
        if self.body.contacts.grounded {
            self.body.velocity.y = self.body.velocity.y.max(0.0) + tuning.ground_kick;
        }
        self.health.invincibility.extend(tuning.invincibility_time);
        self.health.stun_lock.start(tuning.stun_time);
        let shake = tuning.shake;

        self.wall_slide.stop(ctx);
        ctx.effect(EffectId::DashTrail);
        ctx.sound(SoundId::Dash);
        ctx.shake(shake.duration, shake.magnitude);
        debug!(
            "Dash {:?}: {} dashes left",
            self.body.facing, self.dash.remaining
        );
    }

    fn land(&mut self, ctx: &mut SimContext<'_>) {
        let tier = classify_landing(self.fall.impact_speed, &self.fall, &self.tuning.landing);
        if let Some(effect) = tier.effect() {
            ctx.effect(effect);
        }
        if let Some(sound) = tier.sound() {
            ctx.sound(sound);
        }
        let shake = tier.shake(&self.tuning.landing);
        ctx.shake(shake.duration, shake.magnitude);
        debug!("Landed: {:?} at {:.1}", tier, self.fall.impact_speed);

        self.fall.clear(ctx);
        if tier == LandingTier::MaxFall && self.abilities.fall_damage {
            self.damage(self.tuning.landing.fall_damage, true, DamageCause::Fall, ctx);
        }
    }

    /// Reverses facing. Running effects are cancelled and restart on their own
    /// if the body is still running.
    pub fn flip(&mut self, ctx: &mut SimContext<'_>) {
        self.body.facing = self.body.facing.opposite();
        self.locomotion.cancel_running(ctx);
    }

    pub fn damage(
        &mut self,
        amount: i32,
        grants_invincibility: bool,
        cause: DamageCause,
        ctx: &mut SimContext<'_>,
    ) -> DamageOutcome {
        let outcome =
            self.health
                .damage(amount, grants_invincibility, cause, &self.tuning.health, ctx);
        if outcome == DamageOutcome::Killed {
            self.die(cause, ctx);
        }
        outcome
    }

    /// Drops health to zero regardless of invincibility. No-op while a death is
    /// already pending or gameplay is paused.
    pub fn kill(&mut self, cause: DamageCause, ctx: &mut SimContext<'_>) {
        if self.health.is_dead() || !ctx.game_state.is_gameplay_active() {
            return;
        }
        self.health.zero();
        self.die(cause, ctx);
    }

    fn die(&mut self, cause: DamageCause, ctx: &mut SimContext<'_>) {
        info!("Player died ({:?})", cause);
        self.body.state = PlayerState::Frozen;
        self.body.velocity = Vec2::ZERO;
        self.locomotion.cancel_running(ctx);
        self.wall_slide.stop(ctx);
        self.fall.clear(ctx);
        self.platform.reset();
        self.jump_buffer = 0.0;
        self.dash_buffer = 0.0;

        ctx.stop_effect(EffectId::Shadow);
        ctx.effect(EffectId::DeathBurst);
        ctx.sound(SoundId::Death);
        self.health.start_death_timer(&self.tuning.health);
    }

    /// Moves the body to the respawn point and resets all transient state.
    pub fn respawn_from_checkpoint(&mut self, ctx: &mut SimContext<'_>) {
        let target = resolve_respawn(ctx.checkpoints);

        self.body.position = target;
        self.body.velocity = Vec2::ZERO;
        self.body.contacts = ContactSnapshot::default();
        self.was_grounded = false;

        self.locomotion.cancel_running(ctx);
        self.locomotion.was_running = false;
        self.wall_slide.stop(ctx);
        self.fall.clear(ctx);
        self.jump = JumpBudget::new(&self.tuning.jump);
        self.dash.reset(&self.tuning.dash);
        self.platform.reset();
        self.sampler.clear();
        self.jump_buffer = 0.0;
        self.dash_buffer = 0.0;

        self.health.restore(ctx);
        self.set_player_state(PlayerState::Controllable, ctx);

        ctx.effect(EffectId::Shadow);
        ctx.effect(EffectId::RespawnFlash);
        ctx.sound(SoundId::Respawn);
        self.teleported = true;
        info!("Respawned at ({:.1}, {:.1})", target.x, target.y);
    }

    /// Switching to `Controllable` also cancels stun-lock and invincibility.
    pub fn set_player_state(&mut self, state: PlayerState, ctx: &mut SimContext<'_>) {
        if state != self.body.state {
            debug!("Player state {:?} -> {:?}", self.body.state, state);
        }
        self.body.state = state;
        match state {
            PlayerState::Controllable => self.health.clear_timers(ctx),
            PlayerState::Frozen | PlayerState::Teleporting => {
                self.locomotion.cancel_running(ctx);
                self.wall_slide.stop(ctx);
            }
        }
    }

    /// Returns true when the ability was not held before.
    pub fn grant_ability(&mut self, ability: Ability) -> bool {
        let newly = self.abilities.grant(ability);
        if !newly {
            return false;
        }
        info!("Ability granted: {:?}", ability);
        match ability {
            Ability::DoubleJump => self.jump.refill(self.tuning.jump.max_air_jumps),
            Ability::Dash => self.dash.reset(&self.tuning.dash),
            Ability::WallSlide | Ability::WallJump | Ability::FallDamage => {}
        }
        true
    }

    pub fn can_move(&self) -> bool {
        self.body.state == PlayerState::Controllable && !self.health.is_stun_locked()
    }

    pub fn can_simulate(&self, game_state: &dyn GameStateSource) -> bool {
        self.body.state == PlayerState::Controllable && game_state.is_gameplay_active()
    }

    pub fn camera_framing(&self) -> CameraFraming {
        let contacts = self.body.contacts;
        let ledge_ahead = match self.body.facing {
            Facing::Left => contacts.ledge_left,
            Facing::Right => contacts.ledge_right,
        };
        project_camera(
            &CameraInputs {
                facing: self.body.facing,
                grounded: contacts.grounded,
                is_running: self.locomotion.is_running,
                is_falling: self.fall.is_falling,
                at_max_fall_speed: self.fall.at_max_fall_speed,
                ground_below: contacts.ground_below,
                ledge_ahead,
            },
            &self.tuning.camera,
        )
    }

    /// Velocity to hand the physics engine: the character's own plus the
    /// carried platform momentum.
    pub fn output_velocity(&self) -> Vec2 {
        self.body.velocity + Vec2::new(self.platform.contribution(), 0.0)
    }

    /// Reads back the solved body. `velocity` is the full engine velocity; the
    /// platform carry handed out last step is removed again, without letting a
    /// blocked body turn the carry into backwards own speed.
    pub fn sync_from_physics(&mut self, position: Vec2, velocity: Vec2) {
        if self.teleported {
            return;
        }
        self.body.position = position;
        let own_x = platform::own_velocity_x(
            velocity.x,
            self.body.velocity.x,
            self.platform.contribution(),
        );
        self.body.velocity = Vec2::new(own_x, velocity.y);
    }

    /// Position to write back when the controller moved the body directly.
    pub fn take_teleport(&mut self) -> Option<Vec2> {
        if self.teleported {
            self.teleported = false;
            Some(self.body.position)
        } else {
            None
        }
    }

    pub fn jump_phase(&self) -> JumpPhase {
        self.jump.phase(self.body.contacts.grounded)
    }
}
