//! Core domain: game state, pause tracking and camera setup.

mod resources;
mod state;
mod systems;


pub use resources::{GameplayPaused, MENU_PAUSE, gameplay_active};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{setup_camera, sync_physics_pause, toggle_pause, transition_to_run};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Boot), transition_to_run)
            .add_systems(
                Update,
                (toggle_pause, sync_physics_pause)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
