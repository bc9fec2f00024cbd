//! Level domain: test room geometry and moving platforms.

mod components;
mod spawn;
mod systems;


pub use components::PlatformPath;

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::level::spawn::spawn_test_room;
use crate::level::systems::move_platforms;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_test_room).add_systems(
            FixedUpdate,
            move_platforms
                .run_if(in_state(GameState::Run))
                .run_if(gameplay_active),
        );
    }
}
