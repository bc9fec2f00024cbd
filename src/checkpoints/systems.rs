//! Checkpoints domain: sensor handling and the respawn provider.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::checkpoints::components::{AbilityPickup, Checkpoint, SpawnPoint, StartTeleporter};
use crate::checkpoints::resources::ActiveCheckpoint;
use crate::movement::controller::CheckpointProvider;
use crate::movement::{Controller, Player};

/// Read-only view of the level's respawn markers.
#[derive(SystemParam)]
pub struct CheckpointView<'w, 's> {
    active: Res<'w, ActiveCheckpoint>,
    checkpoints: Query<'w, 's, &'static Transform, With<Checkpoint>>,
    teleporters: Query<'w, 's, &'static Transform, With<StartTeleporter>>,
    spawn_points: Query<'w, 's, &'static Transform, With<SpawnPoint>>,
}

impl CheckpointProvider for CheckpointView<'_, '_> {
    /// A despawned checkpoint falls through to the next option.
    fn active_checkpoint_position(&self) -> Option<Vec2> {
        let entity = self.active.0?;
        self.checkpoints
            .get(entity)
            .ok()
            .map(|transform| transform.translation.truncate())
    }

    fn start_teleporter_position(&self) -> Option<Vec2> {
        self.teleporters
            .iter()
            .next()
            .map(|transform| transform.translation.truncate())
    }

    fn default_spawn_position(&self) -> Vec2 {
        self.spawn_points
            .iter()
            .next()
            .map(|transform| transform.translation.truncate())
            .unwrap_or(Vec2::ZERO)
    }
}

/// The entity on the other side of a collision with the player.
pub(crate) fn other_than(player: Entity, collider1: Entity, collider2: Entity) -> Option<Entity> {
    if collider1 == player {
        Some(collider2)
    } else if collider2 == player {
        Some(collider1)
    } else {
        None
    }
}

pub(crate) fn activate_checkpoints(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut active: ResMut<ActiveCheckpoint>,
    player_query: Query<Entity, With<Player>>,
    checkpoint_query: Query<&Checkpoint>,
) {
    let Some(player) = player_query.iter().next() else {
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let Some(other) = other_than(player, event.collider1, event.collider2) else {
            continue;
        };
        if let Ok(checkpoint) = checkpoint_query.get(other) {
            if active.activate(other) {
                info!("Checkpoint '{}' activated", checkpoint.label);
            }
        }
    }
}

pub(crate) fn collect_ability_pickups(
    mut commands: Commands,
    mut collision_start_events: MessageReader<CollisionStart>,
    mut player_query: Query<(Entity, &mut Controller), With<Player>>,
    pickup_query: Query<&AbilityPickup>,
) {
    let Some((player, mut controller)) = player_query.iter_mut().next() else {
        for _ in collision_start_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let Some(other) = other_than(player, event.collider1, event.collider2) else {
            continue;
        };
        let Ok(pickup) = pickup_query.get(other) else {
            continue;
        };
        if controller.0.grant_ability(pickup.ability) {
            info!("Picked up {:?}", pickup.ability);
        }
        commands.entity(other).despawn();
    }
}

/// Clears a checkpoint reference whose entity is gone.
pub(crate) fn forget_removed_checkpoints(
    mut active: ResMut<ActiveCheckpoint>,
    checkpoint_query: Query<(), With<Checkpoint>>,
) {
    if let Some(entity) = active.0 {
        if checkpoint_query.get(entity).is_err() {
            warn!("Active checkpoint {:?} no longer exists", entity);
            active.0 = None;
        }
    }
}
