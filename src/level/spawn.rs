//! Level domain: the test room used to exercise every controller ability.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::checkpoints::{AbilityPickup, Checkpoint, SpawnPoint, StartTeleporter};
use crate::level::components::PlatformPath;
use crate::movement::controller::Ability;
use crate::movement::{GameLayer, Ground, Hazard, MovingPlatform, Wall};

const GROUND_Y: f32 = -200.0;
const GROUND_TOP: f32 = GROUND_Y + 20.0;

fn solid(commands: &mut Commands, marker: impl Bundle, layer: GameLayer, pos: Vec2, size: Vec2) {
    let color = match layer {
        GameLayer::Wall => Color::srgb(0.3, 0.3, 0.4),
        _ => Color::srgb(0.4, 0.5, 0.4),
    };
    commands.spawn((
        marker,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));
}

fn sensor(commands: &mut Commands, marker: impl Bundle, color: Color, pos: Vec2, size: Vec2) {
    commands.spawn((
        marker,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, 0.0),
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    // Markers
    commands.spawn((SpawnPoint, Transform::from_xyz(-600.0, GROUND_TOP + 40.0, 0.0)));
    commands.spawn((
        StartTeleporter,
        Sprite {
            color: Color::srgb(0.3, 0.6, 0.9),
            custom_size: Some(Vec2::new(32.0, 8.0)),
            ..default()
        },
        Transform::from_xyz(-560.0, GROUND_TOP + 40.0, -0.1),
    ));

    // Floor and outer walls
    solid(
        &mut commands,
        Ground,
        GameLayer::Ground,
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(1600.0, 40.0),
    );
    solid(
        &mut commands,
        Wall,
        GameLayer::Wall,
        Vec2::new(-820.0, 200.0),
        Vec2::new(40.0, 800.0),
    );
    solid(
        &mut commands,
        Wall,
        GameLayer::Wall,
        Vec2::new(820.0, 200.0),
        Vec2::new(40.0, 800.0),
    );

    // Low step, short enough to walk up
    solid(
        &mut commands,
        Ground,
        GameLayer::Ground,
        Vec2::new(-380.0, GROUND_TOP + 4.0),
        Vec2::new(120.0, 8.0),
    );

    // Ledges
    solid(
        &mut commands,
        Ground,
        GameLayer::Ground,
        Vec2::new(-250.0, -50.0),
        Vec2::new(150.0, 20.0),
    );
    solid(
        &mut commands,
        Ground,
        GameLayer::Ground,
        Vec2::new(250.0, 50.0),
        Vec2::new(150.0, 20.0),
    );

    // Pillar for wall sliding and wall jumping
    solid(
        &mut commands,
        Wall,
        GameLayer::Wall,
        Vec2::new(-100.0, -30.0),
        Vec2::new(30.0, 300.0),
    );

    // Moving platform across the gap on the right
    commands.spawn((
        MovingPlatform,
        PlatformPath::new(vec![Vec2::new(450.0, -60.0), Vec2::new(700.0, -60.0)], 120.0),
        Sprite {
            color: Color::srgb(0.5, 0.4, 0.3),
            custom_size: Some(Vec2::new(120.0, 16.0)),
            ..default()
        },
        Transform::from_xyz(450.0, -60.0, 0.0),
        RigidBody::Kinematic,
        Collider::rectangle(120.0, 16.0),
        LinearVelocity::default(),
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Platform, [GameLayer::Player]),
    ));

    // Spikes
    commands.spawn((
        Hazard {
            damage: 1,
            knockback: Vec2::new(300.0, 350.0),
        },
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.2),
            custom_size: Some(Vec2::new(80.0, 12.0)),
            ..default()
        },
        Transform::from_xyz(100.0, GROUND_TOP + 6.0, 0.0),
        Collider::rectangle(80.0, 12.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
    ));

    sensor(
        &mut commands,
        Checkpoint {
            label: "pillar".to_string(),
        },
        Color::srgba(0.9, 0.8, 0.2, 0.5),
        Vec2::new(0.0, GROUND_TOP + 32.0),
        Vec2::new(24.0, 64.0),
    );

    // Pickups
    let pickups = [
        (Ability::DoubleJump, Vec2::new(-250.0, 0.0)),
        (Ability::WallSlide, Vec2::new(-160.0, GROUND_TOP + 24.0)),
        (Ability::WallJump, Vec2::new(-40.0, GROUND_TOP + 24.0)),
        (Ability::Dash, Vec2::new(250.0, 100.0)),
    ];
    for (ability, pos) in pickups {
        sensor(
            &mut commands,
            AbilityPickup { ability },
            Color::srgb(0.4, 0.9, 0.6),
            pos,
            Vec2::splat(16.0),
        );
    }

    info!("Spawned test room");
}
