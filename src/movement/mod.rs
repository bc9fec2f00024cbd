//! Movement domain: player controller plugin wiring and public exports.

mod bootstrap;
mod components;
pub mod controller;
mod resources;
mod systems;


pub use components::{
    ContactBuffer, Controller, GameLayer, Ground, Hazard, KillRequest, MovingPlatform, Player,
    Wall,
};
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::movement::bootstrap::{spawn_player, validate_player_setup};
use crate::movement::systems::{
    apply_tuning_changes, collect_contacts, read_input, sample_input, step_controllers,
    sync_from_physics, update_player_sprite,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<KillRequest>()
            .init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<ContactBuffer>()
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(
                Update,
                (read_input, sample_input)
                    .chain()
                    .run_if(in_state(GameState::Run))
                    .run_if(gameplay_active),
            )
            .add_systems(
                Update,
                (validate_player_setup, apply_tuning_changes, update_player_sprite)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                (sync_from_physics, collect_contacts, step_controllers)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
