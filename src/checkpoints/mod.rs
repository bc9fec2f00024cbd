//! Checkpoints domain: respawn markers and ability pickups.

mod components;
mod resources;
mod systems;


pub use components::{AbilityPickup, Checkpoint, SpawnPoint, StartTeleporter};
pub use resources::ActiveCheckpoint;
pub use systems::CheckpointView;

use bevy::prelude::*;

use crate::checkpoints::systems::{
    activate_checkpoints, collect_ability_pickups, forget_removed_checkpoints,
};
use crate::core::GameState;

pub struct CheckpointsPlugin;

impl Plugin for CheckpointsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveCheckpoint>().add_systems(
            FixedUpdate,
            (
                activate_checkpoints,
                collect_ability_pickups,
                forget_removed_checkpoints,
            )
                .run_if(in_state(GameState::Run)),
        );
    }
}
