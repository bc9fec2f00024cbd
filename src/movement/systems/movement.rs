//! Movement domain: fixed-step systems driving the player controller.

use std::collections::HashMap;

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::collisions::{AvianWorld, body_id};
use crate::checkpoints::CheckpointView;
use crate::core::GameplayPaused;
use crate::fx::{CameraRequests, EffectRequest, SoundRequest};
use crate::movement::controller::{Facing, SimContext};
use crate::movement::{
    ContactBuffer, Controller, KillRequest, MovementTuning, MovingPlatform, Player,
};

/// Reads the solved body back from avian before the controller steps.
pub(crate) fn sync_from_physics(
    mut query: Query<(&mut Controller, &Position, &LinearVelocity), With<Player>>,
) {
    for (mut controller, position, velocity) in &mut query {
        controller.0.sync_from_physics(position.0, velocity.0);
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn step_controllers(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    paused: Res<GameplayPaused>,
    mut contacts: ResMut<ContactBuffer>,
    mut kill_requests: MessageReader<KillRequest>,
    checkpoints: CheckpointView,
    platform_query: Query<(Entity, &LinearVelocity), (With<MovingPlatform>, Without<Player>)>,
    mut effects: MessageWriter<EffectRequest>,
    mut sounds: MessageWriter<SoundRequest>,
    mut camera: CameraRequests,
    mut player_query: Query<
        (Entity, &mut Controller, &mut LinearVelocity, &mut Position),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let gameplay_active = !paused.is_paused();
    let events = std::mem::take(&mut contacts.0);
    let kills: Vec<KillRequest> = kill_requests.read().copied().collect();
    if !gameplay_active && !kills.is_empty() {
        debug!("Dropped {} kill request(s) while paused", kills.len());
    }
    let platform_velocities: HashMap<_, _> = platform_query
        .iter()
        .map(|(entity, velocity)| (body_id(entity), velocity.0))
        .collect();

    for (entity, mut controller, mut velocity, mut position) in &mut player_query {
        let world = AvianWorld {
            spatial_query: &spatial_query,
            player: entity,
            contacts: &events,
            platform_velocities: platform_velocities.clone(),
        };
        let mut ctx = SimContext {
            world: &world,
            checkpoints: &checkpoints,
            effects: &mut effects,
            sounds: &mut sounds,
            camera: &mut camera,
            game_state: &gameplay_active,
        };

        for request in &kills {
            controller.0.kill(request.cause, &mut ctx);
        }
        controller.0.step(&mut ctx, dt);

        velocity.0 = controller.0.output_velocity();
        if let Some(target) = controller.0.take_teleport() {
            position.0 = target;
        }
    }
}

/// Pushes reloaded tuning into live controllers.
pub(crate) fn apply_tuning_changes(
    tuning: Res<MovementTuning>,
    mut query: Query<&mut Controller>,
) {
    if !tuning.is_changed() || tuning.is_added() {
        return;
    }
    for mut controller in &mut query {
        controller.0.set_tuning(tuning.clone());
        info!("Applied updated movement tuning to player controller");
    }
}

pub(crate) fn update_player_sprite(mut query: Query<(&Controller, &mut Sprite), With<Player>>) {
    for (controller, mut sprite) in &mut query {
        sprite.flip_x = controller.0.body.facing == Facing::Left;
    }
}
