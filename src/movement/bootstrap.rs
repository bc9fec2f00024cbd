//! Movement domain: player bootstrap and setup validation.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::checkpoints::SpawnPoint;
use crate::movement::controller::{PlayerController, SetupError};
use crate::movement::{Controller, GameLayer, MovementTuning, Player};

/// Spawns the player at the level's spawn point when a run starts.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    spawn_points: Query<&Transform, With<SpawnPoint>>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn = match spawn_points.iter().next() {
        Some(transform) => transform.translation.truncate(),
        None => {
            warn!("No spawn point in level, spawning player at origin");
            Vec2::ZERO
        }
    };

    let controller =
        match PlayerController::new(spawn, tuning.clone(), tuning.starting_abilities) {
            Ok(controller) => controller,
            Err(e) => {
                error!("Player setup failed: {}", e);
                return;
            }
        };

    let size = Vec2::new(tuning.body.width, tuning.body.height);
    info!(
        "Spawning player at ({:.1}, {:.1}): size={}x{}, abilities={:?}",
        spawn.x, spawn.y, size.x, size.y, tuning.starting_abilities
    );

    commands.spawn((
        Player,
        Controller(controller),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(spawn.x, spawn.y, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // The controller owns gravity
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Platform,
                    GameLayer::Sensor,
                    GameLayer::Hazard,
                ],
            ),
        ),
    ));
}

/// A controlled body needs a collider and a rigid body for the physics engine
/// to move it.
pub(crate) fn check_physics_setup(
    entity: Entity,
    has_collider: bool,
    has_rigid_body: bool,
) -> Result<(), SetupError> {
    if !has_collider {
        return Err(SetupError::MissingCollider {
            entity: format!("{entity}"),
        });
    }
    if !has_rigid_body {
        return Err(SetupError::MissingRigidBody {
            entity: format!("{entity}"),
        });
    }
    Ok(())
}

/// Strips the controller from bodies the physics engine cannot drive.
pub(crate) fn validate_player_setup(
    mut commands: Commands,
    query: Query<(Entity, Has<Collider>, Has<RigidBody>), Added<Controller>>,
) {
    for (entity, has_collider, has_rigid_body) in &query {
        if let Err(e) = check_physics_setup(entity, has_collider, has_rigid_body) {
            error!("Player setup failed: {}", e);
            commands.entity(entity).remove::<Controller>();
        }
    }
}
