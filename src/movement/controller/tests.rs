use bevy::math::Vec2;

use super::*;
use crate::movement::resources::{DashTuning, MovementTuning};

const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[derive(Debug, Clone, Copy)]
struct Block {
    center: Vec2,
    half: Vec2,
    platform: bool,
}

fn block(center: Vec2, half: Vec2) -> Block {
    Block {
        center,
        half,
        platform: false,
    }
}

/// Axis-aligned boxes standing in for level colliders.
#[derive(Default)]
struct BoxWorld {
    blocks: Vec<Block>,
    events: Vec<ContactEvent>,
    bodies: Vec<(BodyId, Vec2)>,
}

impl BoxWorld {
    fn candidates(&self, mask: ProbeMask) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| match mask {
            ProbeMask::Solid => true,
            ProbeMask::Platform => b.platform,
        })
    }

    fn set_body_velocity(&mut self, id: BodyId, velocity: Vec2) {
        self.bodies.retain(|(body, _)| *body != id);
        self.bodies.push((id, velocity));
    }
}

fn ray_box(origin: Vec2, direction: Vec2, block: &Block) -> Option<f32> {
    let min = block.center - block.half;
    let max = block.center + block.half;
    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;
    for (o, d, lo, hi) in [
        (origin.x, direction.x, min.x, max.x),
        (origin.y, direction.y, min.y, max.y),
    ] {
        if d.abs() < 1e-6 {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            near = near.max(t1.min(t2));
            far = far.min(t1.max(t2));
        }
    }
    if near > far || far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

impl PhysicsWorld for BoxWorld {
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: ProbeMask) -> bool {
        self.candidates(mask).any(|b| {
            (center.x - b.center.x).abs() < half_extents.x + b.half.x
                && (center.y - b.center.y).abs() < half_extents.y + b.half.y
        })
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: ProbeMask,
    ) -> Option<RayHit> {
        self.candidates(mask)
            .filter_map(|b| ray_box(origin, direction, b))
            .filter(|distance| *distance <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| RayHit { distance })
    }

    fn contact_events(&self) -> &[ContactEvent] {
        &self.events
    }

    fn body_velocity(&self, body: BodyId) -> Option<Vec2> {
        self.bodies
            .iter()
            .find(|(id, _)| *id == body)
            .map(|(_, velocity)| *velocity)
    }
}

struct Spawns {
    checkpoint: Option<Vec2>,
    teleporter: Option<Vec2>,
    default: Vec2,
}

impl CheckpointProvider for Spawns {
    fn active_checkpoint_position(&self) -> Option<Vec2> {
        self.checkpoint
    }

    fn start_teleporter_position(&self) -> Option<Vec2> {
        self.teleporter
    }

    fn default_spawn_position(&self) -> Vec2 {
        self.default
    }
}

#[derive(Default)]
struct Effects {
    played: Vec<EffectId>,
    stopped: Vec<EffectId>,
}

impl Effects {
    fn played(&self, effect: EffectId) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}

impl EffectSink for Effects {
    fn play_effect(&mut self, effect: EffectId) {
        self.played.push(effect);
    }

    fn stop_effect(&mut self, effect: EffectId) {
        self.stopped.push(effect);
    }
}

#[derive(Default)]
struct Sounds(Vec<SoundId>);

impl Sounds {
    fn count(&self, sound: SoundId) -> usize {
        self.0.iter().filter(|s| **s == sound).count()
    }
}

impl SoundSink for Sounds {
    fn play_sound(&mut self, sound: SoundId) {
        self.0.push(sound);
    }
}

#[derive(Default)]
struct Camera {
    shakes: Vec<(f32, f32)>,
    offsets: Vec<Vec2>,
    zooms: Vec<f32>,
}

impl CameraSink for Camera {
    fn shake(&mut self, duration: f32, magnitude: f32) {
        self.shakes.push((duration, magnitude));
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offsets.push(offset);
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zooms.push(zoom);
    }
}

struct Harness {
    world: BoxWorld,
    spawns: Spawns,
    effects: Effects,
    sounds: Sounds,
    camera: Camera,
    active: bool,
    controller: PlayerController,
}

/// Player standing at (0, 24) on wide ground whose top is y = 0.
fn grounded(abilities: AbilityFlags) -> Harness {
    let mut harness = airborne(abilities);
    harness
        .world
        .blocks
        .push(block(Vec2::new(0.0, -50.0), Vec2::new(5000.0, 50.0)));
    harness.controller.body.position = Vec2::new(0.0, 24.0);
    harness
}

/// Player high up in an empty world.
fn airborne(abilities: AbilityFlags) -> Harness {
    let controller =
        PlayerController::new(Vec2::new(0.0, 5000.0), MovementTuning::default(), abilities)
            .unwrap();
    Harness {
        world: BoxWorld::default(),
        spawns: Spawns {
            checkpoint: None,
            teleporter: None,
            default: Vec2::new(-100.0, 24.0),
        },
        effects: Effects::default(),
        sounds: Sounds::default(),
        camera: Camera::default(),
        active: true,
        controller,
    }
}

impl Harness {
    fn tick(&mut self, input: InputSnapshot) {
        self.act(|controller, ctx| controller.tick(&input, ctx, DT));
        self.world.events.clear();
    }

    fn idle(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick(InputSnapshot::default());
        }
    }

    fn act<R>(&mut self, f: impl FnOnce(&mut PlayerController, &mut SimContext<'_>) -> R) -> R {
        let mut ctx = SimContext {
            world: &self.world,
            checkpoints: &self.spawns,
            effects: &mut self.effects,
            sounds: &mut self.sounds,
            camera: &mut self.camera,
            game_state: &self.active,
        };
        f(&mut self.controller, &mut ctx)
    }

    fn tuning(&self) -> MovementTuning {
        self.controller.tuning().clone()
    }

    fn place(&mut self, position: Vec2) {
        self.controller.body.position = position;
    }
}

fn press_jump() -> InputSnapshot {
    InputSnapshot {
        jump_pressed: true,
        jump_held: true,
        ..Default::default()
    }
}

fn press_dash() -> InputSnapshot {
    InputSnapshot {
        dash_pressed: true,
        ..Default::default()
    }
}

fn hold(horizontal: f32, vertical: f32) -> InputSnapshot {
    InputSnapshot {
        horizontal,
        vertical,
        ..Default::default()
    }
}

fn double_jump_only() -> AbilityFlags {
    AbilityFlags {
        double_jump: true,
        ..Default::default()
    }
}

#[test]
fn new_rejects_degenerate_body() {
    let mut tuning = MovementTuning::default();
    tuning.body.width = 0.0;
    let result = PlayerController::new(Vec2::ZERO, tuning, AbilityFlags::default());
    assert!(matches!(result, Err(SetupError::InvalidBodySize { .. })));
}

#[test]
fn ground_jump_from_rest() {
    let mut h = grounded(AbilityFlags::default());
    let tuning = h.tuning();
    h.idle(1);
    assert!(h.controller.body.contacts.grounded);

    h.tick(press_jump());

    let c = &h.controller;
    assert!(approx(
        c.body.velocity.y,
        tuning.jump.jump_force - tuning.gravity.gravity * DT
    ));
    assert!(c.jump.is_jumping);
    assert_eq!(c.jump.remaining_air_jumps, tuning.jump.max_air_jumps);
    assert_eq!(h.effects.played(EffectId::JumpDust), 1);
    assert_eq!(h.sounds.count(SoundId::Jump), 1);
    assert_eq!(c.jump_buffer(), 0.0);
}

#[test]
fn coyote_jump_counts_as_ground_jump() {
    let mut h = grounded(double_jump_only());
    let tuning = h.tuning();
    h.idle(1);
    h.place(Vec2::new(0.0, 500.0));
    h.idle(3);
    assert_eq!(h.controller.jump_phase(), JumpPhase::AirborneCanCoyote);

    h.tick(press_jump());

    assert_eq!(h.sounds.count(SoundId::Jump), 1);
    assert_eq!(h.sounds.count(SoundId::AirJump), 0);
    assert_eq!(h.controller.jump.remaining_air_jumps, tuning.jump.max_air_jumps);
    assert!(h.controller.body.velocity.y > 0.0);
}

#[test]
fn coyote_window_closes() {
    let mut h = grounded(AbilityFlags::default());
    h.idle(1);
    h.place(Vec2::new(0.0, 500.0));
    h.idle(12);
    assert_eq!(h.controller.jump_phase(), JumpPhase::AirborneNoCoyote);

    h.tick(press_jump());

    assert_eq!(h.sounds.count(SoundId::Jump), 0);
    assert!(h.controller.body.velocity.y < 0.0);
}

#[test]
fn buffered_jump_fires_on_landing() {
    let mut h = grounded(AbilityFlags::default());
    h.place(Vec2::new(0.0, 500.0));
    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::Jump), 0);
    h.idle(3);

    h.place(Vec2::new(0.0, 24.0));
    h.idle(1);

    assert_eq!(h.sounds.count(SoundId::Jump), 1);
    assert!(h.controller.body.velocity.y > 0.0);
}

#[test]
fn stale_jump_buffer_is_dropped() {
    let mut h = grounded(AbilityFlags::default());
    h.place(Vec2::new(0.0, 500.0));
    h.tick(press_jump());
    h.idle(10);

    h.place(Vec2::new(0.0, 24.0));
    h.idle(1);

    assert_eq!(h.sounds.count(SoundId::Jump), 0);
    assert!(!h.controller.jump.is_jumping);
    assert_eq!(h.controller.body.velocity.y, 0.0);
}

#[test]
fn air_jump_spends_budget_once() {
    let mut h = airborne(double_jump_only());
    let tuning = h.tuning();

    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::AirJump), 1);
    assert_eq!(h.controller.jump.remaining_air_jumps, 0);
    assert!(approx(
        h.controller.body.velocity.y,
        tuning.jump.jump_force - tuning.gravity.gravity * DT
    ));

    h.idle(10);
    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::AirJump), 1);
    assert_eq!(h.effects.played(EffectId::AirJumpBurst), 1);
}

#[test]
fn air_jump_needs_ability() {
    let mut h = airborne(AbilityFlags::default());
    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::AirJump), 0);
    assert!(h.controller.body.velocity.y < 0.0);
}

/// Walls on both sides: no single side to jump off, and a wall jumper never
/// falls back to an air jump while touching one.
fn shaft(abilities: AbilityFlags) -> Harness {
    let mut h = airborne(abilities);
    h.world
        .blocks
        .push(block(Vec2::new(23.0, 0.0), Vec2::new(10.0, 10000.0)));
    h.world
        .blocks
        .push(block(Vec2::new(-23.0, 0.0), Vec2::new(10.0, 10000.0)));
    h.idle(1);
    h
}

#[test]
fn touching_a_wall_suppresses_air_jump_for_wall_jumpers() {
    let mut h = shaft(AbilityFlags {
        double_jump: true,
        wall_jump: true,
        ..Default::default()
    });
    let tuning = h.tuning();
    assert!(h.controller.body.contacts.wall_left);
    assert!(h.controller.body.contacts.wall_right);

    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::AirJump), 0);
    assert_eq!(h.sounds.count(SoundId::WallJump), 0);
    assert_eq!(
        h.controller.jump.remaining_air_jumps,
        tuning.jump.max_air_jumps
    );
    assert!(h.controller.body.velocity.y < 0.0);
}

#[test]
fn walls_do_not_block_air_jump_without_wall_jump() {
    let mut h = shaft(double_jump_only());
    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::AirJump), 1);
    assert_eq!(h.controller.jump.remaining_air_jumps, 0);
    assert!(h.controller.body.velocity.y > 0.0);
}

#[test]
fn jump_cut_applies_once() {
    let mut h = grounded(AbilityFlags::default());
    let tuning = h.tuning();
    h.idle(1);
    h.tick(press_jump());
    h.place(Vec2::new(0.0, 200.0));
    let before = h.controller.body.velocity.y;

    let release = InputSnapshot {
        jump_released: true,
        ..Default::default()
    };
    h.tick(release);
    let after_cut = h.controller.body.velocity.y;
    assert!(approx(
        after_cut,
        before * tuning.jump.variable_jump_multiplier - tuning.gravity.gravity * DT
    ));
    assert!(h.controller.jump.is_jump_cut);

    h.tick(release);
    assert!(approx(
        h.controller.body.velocity.y,
        after_cut - tuning.gravity.gravity * DT
    ));
}

#[test]
fn release_between_steps_is_not_lost() {
    let mut h = grounded(AbilityFlags::default());
    h.idle(1);
    h.tick(press_jump());
    h.place(Vec2::new(0.0, 200.0));

    let release = InputSnapshot {
        jump_released: true,
        ..Default::default()
    };
    h.controller.frame(&release, DT);
    h.controller.frame(&InputSnapshot::default(), DT);
    h.act(|c, ctx| c.step(ctx, DT));

    assert!(h.controller.jump.is_jump_cut);
}

#[test]
fn kick_turn_reverses_horizontal_speed() {
    let mut h = grounded(AbilityFlags::default());
    let tuning = h.tuning();
    h.idle(1);
    h.controller.body.velocity.x = 200.0;

    h.tick(InputSnapshot {
        horizontal: -1.0,
        ..press_jump()
    });

    // Launched at the jump force to the left, then one step of acceleration.
    assert!(h.controller.body.velocity.x < -tuning.run.max_move_speed);
    assert_eq!(h.controller.body.facing, Facing::Left);
}

#[test]
fn dash_budget_and_refill() {
    let mut h = airborne(AbilityFlags {
        dash: true,
        ..Default::default()
    });

    h.tick(press_dash());
    assert_eq!(h.controller.dash.remaining, 0);
    assert!(h.controller.dash.is_dashing());
    assert!(h.controller.dash.cooldown_running);
    assert!(h.controller.body.velocity.x > 0.0);
    assert!(h.controller.health.is_invincible());
    assert_eq!(h.sounds.count(SoundId::Dash), 1);
    assert_eq!(h.effects.played(EffectId::DashTrail), 1);

    // Out of dashes: the press is ignored once the stun wears off.
    h.idle(14);
    h.tick(press_dash());
    assert_eq!(h.sounds.count(SoundId::Dash), 1);
    h.idle(14);
    assert_eq!(h.controller.dash.remaining, 0);

    h.idle(10);
    assert_eq!(h.controller.dash.remaining, 1);
    assert!(!h.controller.dash.cooldown_running);

    h.tick(press_dash());
    assert_eq!(h.sounds.count(SoundId::Dash), 2);
}

#[test]
fn dash_needs_ability() {
    let mut h = airborne(AbilityFlags::default());
    h.tick(press_dash());
    assert_eq!(h.sounds.count(SoundId::Dash), 0);
    assert_eq!(h.controller.dash.remaining, 1);
}

#[test]
fn single_refill_process_restores_one_charge_per_cooldown() {
    let tuning = DashTuning {
        max_dashes: 3,
        cooldown_duration: 0.5,
        ..Default::default()
    };
    let mut dash = DashBudget::new(&tuning);
    assert!(dash.consume(&tuning));
    assert!(dash.consume(&tuning));
    assert!(dash.consume(&tuning));
    assert!(!dash.consume(&tuning));

    assert_eq!(dash.tick(&tuning, 0.4), 0);
    assert_eq!(dash.tick(&tuning, 0.2), 1);
    assert_eq!(dash.remaining, 1);
    assert_eq!(dash.tick(&tuning, 0.5), 1);
    assert_eq!(dash.tick(&tuning, 0.5), 1);
    assert_eq!(dash.remaining, 3);
    assert!(!dash.cooldown_running);
    assert_eq!(dash.tick(&tuning, 5.0), 0);
}

#[test]
fn fall_speed_never_exceeds_cap() {
    let mut h = airborne(AbilityFlags::default());
    let max = h.tuning().gravity.max_fall_speed;

    for _ in 0..120 {
        h.tick(hold(0.0, -1.0));
        assert!(h.controller.body.velocity.y >= -max - 1e-3);
    }
    assert!(h.controller.fall.at_max_fall_speed);
    assert!(h.controller.fall.is_fast_falling);
    assert_eq!(h.effects.played(EffectId::MaxFallStreaks), 1);
}

#[test]
fn fast_drop_accelerates_fall() {
    let mut plain = airborne(AbilityFlags::default());
    let mut dropping = airborne(AbilityFlags::default());
    plain.idle(5);
    for _ in 0..5 {
        dropping.tick(hold(0.0, -1.0));
    }
    assert!(dropping.controller.body.velocity.y < plain.controller.body.velocity.y);
}

#[test]
fn max_fall_landing_with_fall_damage() {
    let mut h = grounded(AbilityFlags {
        fall_damage: true,
        ..Default::default()
    });
    let max_health = h.tuning().health.max_health;
    h.place(Vec2::new(0.0, 800.0));
    h.idle(30);
    assert!(h.controller.fall.at_max_fall_speed);

    h.place(Vec2::new(0.0, 24.0));
    h.idle(1);

    assert_eq!(h.effects.played(EffectId::LandMaxFall), 1);
    assert_eq!(h.sounds.count(SoundId::LandHeavy), 1);
    assert!(h.effects.stopped.contains(&EffectId::MaxFallStreaks));
    assert_eq!(h.controller.health.current, max_health - 1);
    assert_eq!(h.controller.body.velocity.y, 0.0);
}

#[test]
fn low_landing_tier() {
    let mut h = grounded(AbilityFlags::default());
    let max_health = h.tuning().health.max_health;
    h.place(Vec2::new(0.0, 500.0));
    h.idle(7);

    h.place(Vec2::new(0.0, 24.0));
    h.idle(1);

    assert_eq!(h.effects.played(EffectId::LandLow), 1);
    assert_eq!(h.sounds.count(SoundId::LandSoft), 1);
    assert_eq!(h.controller.health.current, max_health);
    assert!(!h.controller.fall.is_falling);
}

#[test]
fn running_effects_follow_speed() {
    let mut h = grounded(AbilityFlags::default());
    h.idle(1);
    for _ in 0..20 {
        h.tick(hold(1.0, 0.0));
    }
    assert!(h.controller.locomotion.is_running);
    assert_eq!(h.effects.played(EffectId::RunDust), 1);
    assert_eq!(h.effects.played(EffectId::MotionBlur), 1);

    h.tick(hold(-1.0, 0.0));
    assert_eq!(h.controller.body.facing, Facing::Left);
    assert!(h.effects.stopped.contains(&EffectId::RunDust));

    h.idle(60);
    assert!(!h.controller.locomotion.is_running);
    assert_eq!(h.controller.body.velocity.x, 0.0);
}

#[test]
fn grounded_run_settles_at_top_speed() {
    let mut h = grounded(AbilityFlags::default());
    let top_speed = h.tuning().run.max_move_speed;
    h.idle(1);

    let mut previous = 0.0;
    for _ in 0..120 {
        h.tick(hold(1.0, 0.0));
        let speed = h.controller.body.velocity.x;
        assert!(speed >= previous);
        assert!(speed <= top_speed);
        previous = speed;
    }
    assert!(top_speed - previous < top_speed * 0.01);
}

#[test]
fn wall_slide_and_wall_jump() {
    let mut h = airborne(AbilityFlags {
        wall_slide: true,
        wall_jump: true,
        ..Default::default()
    });
    let tuning = h.tuning();
    h.world
        .blocks
        .push(block(Vec2::new(23.0, 0.0), Vec2::new(10.0, 10000.0)));

    h.idle(2);
    assert!(h.controller.wall_slide.active);
    assert_eq!(h.controller.wall_slide.side, Some(WallSide::Right));
    assert_eq!(h.controller.body.facing, Facing::Left);
    assert_eq!(h.effects.played(EffectId::WallSlide), 1);

    h.idle(60);
    assert!((h.controller.body.velocity.y + tuning.wall.slide_speed).abs() < 1.0);

    h.tick(press_jump());
    let c = &h.controller;
    assert_eq!(h.sounds.count(SoundId::WallJump), 1);
    assert!(c.body.velocity.x < 0.0);
    assert!(c.body.velocity.y > 0.0);
    assert!(!c.wall_slide.active);
    assert!(c.health.is_stun_locked());
    assert!(h.effects.stopped.contains(&EffectId::WallSlide));
}

#[test]
fn wall_slide_needs_ability() {
    let mut h = airborne(AbilityFlags::default());
    h.world
        .blocks
        .push(block(Vec2::new(23.0, 0.0), Vec2::new(10.0, 10000.0)));
    h.idle(5);
    assert!(h.controller.body.contacts.wall_right);
    assert!(!h.controller.wall_slide.active);
}

#[test]
fn step_climb_lifts_onto_low_step() {
    let mut h = grounded(AbilityFlags::default());
    let tuning = h.tuning();
    h.world
        .blocks
        .push(block(Vec2::new(20.0, 3.0), Vec2::new(6.0, 3.0)));
    h.idle(1);
    assert_eq!(h.controller.take_teleport(), None);

    h.tick(hold(1.0, 0.0));

    let expected = Vec2::new(
        tuning.step_climb.forward_step,
        24.0 + tuning.step_climb.step_height,
    );
    assert_eq!(h.controller.take_teleport(), Some(expected));
    assert_eq!(h.controller.take_teleport(), None);
}

#[test]
fn step_climb_ignores_tall_walls() {
    let mut h = grounded(AbilityFlags::default());
    h.world
        .blocks
        .push(block(Vec2::new(20.0, 50.0), Vec2::new(6.0, 50.0)));
    h.idle(1);
    h.tick(hold(1.0, 0.0));
    assert_eq!(h.controller.take_teleport(), None);
}

#[test]
fn step_climb_foot_clearance_is_tuned() {
    let mut h = grounded(AbilityFlags::default());
    let mut tuning = h.tuning();
    tuning.step_climb.foot_clearance = 7.0;
    h.controller.set_tuning(tuning);
    h.world
        .blocks
        .push(block(Vec2::new(20.0, 3.0), Vec2::new(6.0, 3.0)));
    h.idle(1);

    // The lower ray now passes over the 6 unit step.
    h.tick(hold(1.0, 0.0));
    assert_eq!(h.controller.take_teleport(), None);
}

#[test]
fn platform_carry_then_decay() {
    let mut h = grounded(AbilityFlags::default());
    let platform = BodyId(7);
    h.world.set_body_velocity(platform, Vec2::new(50.0, 0.0));
    h.world.events.push(ContactEvent::BodyEntered(platform));
    h.idle(1);
    assert_eq!(h.controller.platform.contribution(), 50.0);
    assert_eq!(h.controller.output_velocity().x, 50.0);

    h.world.set_body_velocity(platform, Vec2::new(-30.0, 0.0));
    h.idle(3);
    assert_eq!(h.controller.platform.contribution(), -30.0);

    h.world.events.push(ContactEvent::BodyExited(platform));
    h.idle(1);
    assert_eq!(h.controller.platform.contribution(), -30.0);

    let mut previous = 30.0;
    for _ in 0..200 {
        h.idle(1);
        let magnitude = h.controller.platform.contribution().abs();
        assert!(magnitude <= previous);
        previous = magnitude;
    }
    assert_eq!(h.controller.platform.contribution(), 0.0);
}

#[test]
fn destroyed_platform_counts_as_exit() {
    let mut h = grounded(AbilityFlags::default());
    let platform = BodyId(3);
    h.world.set_body_velocity(platform, Vec2::new(40.0, 0.0));
    h.world.events.push(ContactEvent::BodyEntered(platform));
    h.idle(1);

    h.world.bodies.clear();
    h.idle(1);
    assert!(!h.controller.platform.on_ground_object);
    assert_eq!(h.controller.platform.contribution(), 40.0);
    h.idle(1);
    assert!(h.controller.platform.contribution() < 40.0);
}

#[test]
fn sync_removes_platform_carry() {
    let mut h = grounded(AbilityFlags::default());
    let platform = BodyId(1);
    h.world.set_body_velocity(platform, Vec2::new(50.0, 0.0));
    h.world.events.push(ContactEvent::BodyEntered(platform));
    h.idle(1);

    h.controller
        .sync_from_physics(Vec2::new(1.0, 24.0), Vec2::new(60.0, 0.0));
    assert_eq!(h.controller.body.velocity, Vec2::new(10.0, 0.0));
    assert_eq!(h.controller.body.position, Vec2::new(1.0, 24.0));
}

#[test]
fn blocked_sync_does_not_reverse_own_speed() {
    let mut h = grounded(AbilityFlags::default());
    let tuning = h.tuning();
    let platform = BodyId(3);
    h.world.set_body_velocity(platform, Vec2::new(120.0, 0.0));
    h.world.events.push(ContactEvent::BodyEntered(platform));
    h.idle(1);
    assert_eq!(h.controller.output_velocity().x, 120.0);

    // Pinned against a wall: the solver stops the body outright.
    h.controller.sync_from_physics(Vec2::new(0.0, 24.0), Vec2::ZERO);
    assert_eq!(h.controller.body.velocity.x, 0.0);

    h.tick(InputSnapshot {
        horizontal: 1.0,
        ..press_jump()
    });
    let vx = h.controller.body.velocity.x;
    assert!(vx >= 0.0);
    assert!(vx < tuning.run.max_move_speed);
    assert_eq!(h.controller.body.facing, Facing::Right);
}

#[test]
fn own_speed_recovered_from_engine_velocity() {
    use super::platform::own_velocity_x;

    // No carry: the engine velocity is the own speed.
    assert_eq!(own_velocity_x(-40.0, 100.0, 0.0), -40.0);
    // Unobstructed: the carry comes straight back out.
    assert_eq!(own_velocity_x(150.0, 100.0, 50.0), 100.0);
    assert_eq!(own_velocity_x(-20.0, 100.0, -120.0), 100.0);
    // Slowed: own speed shrinks but keeps its sign.
    assert_eq!(own_velocity_x(120.0, 100.0, 50.0), 70.0);
    assert_eq!(own_velocity_x(30.0, 100.0, 50.0), 0.0);
    // Stopped or reversed: never more than before, never backwards.
    assert_eq!(own_velocity_x(0.0, 0.0, 120.0), 0.0);
    assert_eq!(own_velocity_x(0.0, 100.0, -120.0), 100.0);
    assert_eq!(own_velocity_x(-10.0, 100.0, 50.0), 0.0);
}

#[test]
fn health_stays_in_bounds() {
    let mut h = grounded(AbilityFlags::default());
    let max = h.tuning().health.max_health;

    assert_eq!(
        h.act(|c, ctx| c.damage(0, true, DamageCause::Scripted, ctx)),
        DamageOutcome::Ignored
    );
    assert_eq!(
        h.act(|c, ctx| c.damage(-3, true, DamageCause::Scripted, ctx)),
        DamageOutcome::Ignored
    );
    assert_eq!(h.controller.health.current, max);

    assert_eq!(
        h.act(|c, ctx| c.damage(1, true, DamageCause::Hazard, ctx)),
        DamageOutcome::Hurt
    );
    assert_eq!(
        h.act(|c, ctx| c.damage(1, true, DamageCause::Hazard, ctx)),
        DamageOutcome::Ignored
    );
    assert_eq!(h.controller.health.current, max - 1);

    h.act(|c, ctx| c.set_player_state(PlayerState::Controllable, ctx));
    assert_eq!(
        h.act(|c, ctx| c.damage(99, false, DamageCause::Hazard, ctx)),
        DamageOutcome::Killed
    );
    assert_eq!(h.controller.health.current, 0);
    assert_eq!(
        h.act(|c, ctx| c.damage(1, false, DamageCause::Hazard, ctx)),
        DamageOutcome::Ignored
    );
    assert_eq!(h.controller.health.current, 0);
}

#[test]
fn kill_is_ignored_while_paused() {
    let mut h = grounded(AbilityFlags::default());
    let max = h.tuning().health.max_health;
    h.active = false;

    h.act(|c, ctx| c.kill(DamageCause::Scripted, ctx));
    assert_eq!(h.controller.health.current, max);
    assert_eq!(h.controller.body.state, PlayerState::Controllable);
    assert_eq!(h.effects.played(EffectId::DeathBurst), 0);

    h.active = true;
    h.act(|c, ctx| c.kill(DamageCause::Scripted, ctx));
    assert!(h.controller.health.is_dead());
    assert_eq!(h.effects.played(EffectId::DeathBurst), 1);
}

#[test]
fn invincibility_expires() {
    let mut h = grounded(AbilityFlags::default());
    h.act(|c, ctx| c.damage(1, true, DamageCause::Hazard, ctx));
    assert!(h.controller.health.is_invincible());
    assert!(!h.controller.can_move());

    h.idle(65);
    assert!(!h.controller.health.is_invincible());
    assert!(h.controller.can_move());
    assert!(h.effects.stopped.contains(&EffectId::DamageTint));

    assert_eq!(
        h.act(|c, ctx| c.damage(1, true, DamageCause::Hazard, ctx)),
        DamageOutcome::Hurt
    );
    assert_eq!(h.effects.played(EffectId::Bleeding), 1);
}

#[test]
fn controllable_clears_stun_and_invincibility() {
    let mut h = grounded(AbilityFlags::default());
    h.act(|c, ctx| c.damage(1, true, DamageCause::Scripted, ctx));
    assert!(h.controller.health.is_stun_locked());

    h.act(|c, ctx| c.set_player_state(PlayerState::Controllable, ctx));
    assert!(!h.controller.health.is_stun_locked());
    assert!(!h.controller.health.is_invincible());
    assert!(h.controller.can_move());
}

#[test]
fn death_then_deferred_respawn() {
    let mut h = grounded(AbilityFlags::default());
    let tuning = h.tuning();
    h.spawns.checkpoint = Some(Vec2::new(100.0, 24.0));

    let outcome =
        h.act(|c, ctx| c.damage(tuning.health.max_health, true, DamageCause::Hazard, ctx));
    assert_eq!(outcome, DamageOutcome::Killed);
    assert_eq!(h.controller.body.state, PlayerState::Frozen);
    assert_eq!(h.effects.played(EffectId::DeathBurst), 1);
    assert_eq!(h.sounds.count(SoundId::Death), 1);
    assert!(!h.controller.can_move());

    h.tick(press_jump());
    assert_eq!(h.sounds.count(SoundId::Jump), 0);

    h.idle(68);
    assert_eq!(h.controller.body.state, PlayerState::Frozen);

    h.idle(10);
    let c = &mut h.controller;
    assert_eq!(c.body.state, PlayerState::Controllable);
    assert_eq!(c.health.current, tuning.health.max_health);
    assert_eq!(c.take_teleport(), Some(Vec2::new(100.0, 24.0)));
    assert_eq!(h.effects.played(EffectId::RespawnFlash), 1);
    assert_eq!(h.sounds.count(SoundId::Respawn), 1);
}

#[test]
fn respawn_fallback_chain() {
    let mut spawns = Spawns {
        checkpoint: Some(Vec2::new(1.0, 1.0)),
        teleporter: Some(Vec2::new(2.0, 2.0)),
        default: Vec2::new(3.0, 3.0),
    };
    assert_eq!(resolve_respawn(&spawns), Vec2::new(1.0, 1.0));
    spawns.checkpoint = None;
    assert_eq!(resolve_respawn(&spawns), Vec2::new(2.0, 2.0));
    spawns.teleporter = None;
    assert_eq!(resolve_respawn(&spawns), Vec2::new(3.0, 3.0));
}

#[test]
fn restart_respawns_immediately() {
    let mut h = grounded(AbilityFlags {
        dash: true,
        ..Default::default()
    });
    h.spawns.teleporter = Some(Vec2::new(300.0, 24.0));
    h.tick(press_dash());
    h.idle(2);

    h.tick(InputSnapshot {
        restart_pressed: true,
        ..Default::default()
    });

    let c = &mut h.controller;
    assert_eq!(c.body.velocity, Vec2::ZERO);
    assert_eq!(c.dash.remaining, 1);
    assert!(!c.dash.cooldown_running);
    assert_eq!(c.take_teleport(), Some(Vec2::new(300.0, 24.0)));
}

#[test]
fn hazard_hurts_and_knocks_back() {
    let mut h = grounded(AbilityFlags::default());
    let max = h.tuning().health.max_health;
    h.idle(1);
    h.world.events.push(ContactEvent::Hazard {
        damage: 1,
        knockback: Vec2::new(-200.0, 300.0),
    });
    h.idle(1);

    let c = &h.controller;
    assert_eq!(c.health.current, max - 1);
    assert!(c.health.is_invincible());
    assert!(c.body.velocity.x < 0.0);
    assert!(c.body.velocity.y > 0.0);
    assert_eq!(h.effects.played(EffectId::HurtFlash), 1);
    assert_eq!(h.sounds.count(SoundId::Hurt), 1);
}

#[test]
fn falling_out_of_the_level_kills() {
    let mut h = airborne(AbilityFlags::default());
    let kill_plane = h.tuning().health.kill_plane_y;
    h.place(Vec2::new(0.0, kill_plane - 10.0));
    h.idle(1);
    assert_eq!(h.controller.body.state, PlayerState::Frozen);
    assert!(h.controller.health.is_dead());
    assert_eq!(h.effects.played(EffectId::DeathBurst), 1);
}

#[test]
fn paused_gameplay_does_not_simulate() {
    let mut h = airborne(AbilityFlags::default());
    h.active = false;
    h.idle(10);
    assert_eq!(h.controller.body.velocity, Vec2::ZERO);
    assert!(h.camera.offsets.is_empty());
    assert!(!h.controller.can_simulate(&false));
    assert!(h.controller.can_simulate(&true));
}

#[test]
fn teleporting_pauses_simulation() {
    let mut h = airborne(AbilityFlags::default());
    h.act(|c, ctx| c.set_player_state(PlayerState::Teleporting, ctx));
    h.idle(5);
    assert_eq!(h.controller.body.velocity, Vec2::ZERO);

    h.act(|c, ctx| c.set_player_state(PlayerState::Controllable, ctx));
    h.idle(1);
    assert!(h.controller.body.velocity.y < 0.0);
}

#[test]
fn granting_abilities() {
    let mut h = airborne(AbilityFlags::default());
    h.controller.jump.remaining_air_jumps = 0;
    assert!(h.controller.grant_ability(Ability::DoubleJump));
    assert!(!h.controller.grant_ability(Ability::DoubleJump));
    assert!(h.controller.abilities.has(Ability::DoubleJump));
    assert_eq!(
        h.controller.jump.remaining_air_jumps,
        h.tuning().jump.max_air_jumps
    );
}

#[test]
fn lowering_budgets_clamps_remaining_charges() {
    let mut h = airborne(double_jump_only());
    let mut tuning = h.tuning();
    assert_eq!(h.controller.jump.remaining_air_jumps, tuning.jump.max_air_jumps);
    assert_eq!(h.controller.dash.remaining, tuning.dash.max_dashes);

    tuning.jump.max_air_jumps = 0;
    tuning.dash.max_dashes = 0;
    h.controller.set_tuning(tuning.clone());
    assert_eq!(h.controller.jump.remaining_air_jumps, 0);
    assert_eq!(h.controller.dash.remaining, 0);

    // Raising the caps again does not hand out charges.
    tuning.jump.max_air_jumps = 3;
    tuning.dash.max_dashes = 2;
    h.controller.set_tuning(tuning);
    assert_eq!(h.controller.jump.remaining_air_jumps, 0);
    assert_eq!(h.controller.dash.remaining, 0);
}

#[test]
fn camera_follows_every_step() {
    let mut h = grounded(AbilityFlags::default());
    let camera = h.tuning().camera;
    h.idle(1);
    assert_eq!(h.camera.offsets.last(), Some(&Vec2::new(camera.look_ahead, 0.0)));
    assert_eq!(h.camera.zooms.last(), Some(&camera.base_zoom));
}

#[test]
fn camera_peeks_over_ledges() {
    let mut h = airborne(AbilityFlags::default());
    let camera = h.tuning().camera;
    h.world
        .blocks
        .push(block(Vec2::new(0.0, -50.0), Vec2::new(12.0, 50.0)));
    h.place(Vec2::new(0.0, 24.0));
    h.idle(1);
    assert!(h.controller.body.contacts.ledge_right);
    assert_eq!(
        h.camera.offsets.last(),
        Some(&Vec2::new(camera.look_ahead, -camera.ledge_peek))
    );
}

#[test]
fn camera_projection() {
    let tuning = MovementTuning::default().camera;
    let falling = CameraInputs {
        facing: Facing::Left,
        is_falling: true,
        ground_below: Some(30.0),
        ..Default::default()
    };
    let framing = project_camera(&falling, &tuning);
    assert_eq!(framing.offset, Vec2::new(-tuning.look_ahead, -30.0));
    assert_eq!(framing.zoom, tuning.base_zoom);

    let far = CameraInputs {
        ground_below: None,
        ..falling
    };
    assert_eq!(project_camera(&far, &tuning).offset.y, -tuning.fall_look_down);

    let plummeting = CameraInputs {
        at_max_fall_speed: true,
        ..falling
    };
    let framing = project_camera(&plummeting, &tuning);
    assert_eq!(framing.offset.y, -tuning.max_fall_look_down);
    assert_eq!(framing.zoom, tuning.fall_zoom);

    let running = CameraInputs {
        facing: Facing::Right,
        grounded: true,
        is_running: true,
        ..Default::default()
    };
    let framing = project_camera(&running, &tuning);
    assert_eq!(framing.offset, Vec2::new(tuning.run_look_ahead, 0.0));
    assert_eq!(framing.zoom, tuning.run_zoom);
}

#[test]
fn countdown_restarts_instead_of_stacking() {
    let mut timer = Countdown::default();
    timer.start(1.0);
    timer.start(0.5);
    assert_eq!(timer.remaining(), 0.5);
    timer.extend(0.2);
    assert_eq!(timer.remaining(), 0.5);
    assert!(!timer.tick(0.25));
    assert!(timer.tick(0.25));
    assert!(!timer.is_active());
    assert!(!timer.tick(0.25));
}

#[test]
fn jump_machine_phases() {
    let tuning = MovementTuning::default().jump;
    let mut jump = JumpBudget::new(&tuning);
    assert_eq!(jump.phase(false), JumpPhase::AirborneNoCoyote);

    jump.on_grounded(&tuning);
    assert_eq!(jump.phase(true), JumpPhase::GroundedReady);
    assert_eq!(jump.phase(false), JumpPhase::AirborneCanCoyote);

    jump.begin_jump(JumpKind::Ground);
    assert_eq!(jump.phase(false), JumpPhase::Jumping);
    assert_eq!(jump.try_cut(400.0, 0.5), Some(200.0));
    assert_eq!(jump.try_cut(200.0, 0.5), None);
    assert_eq!(jump.phase(false), JumpPhase::JumpCut);
}
