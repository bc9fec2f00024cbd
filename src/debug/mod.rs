//! Debug domain: dev-only hotkeys and a controller status overlay.
//!
//! Hotkeys (hold Ctrl):
//! - G: grant every ability
//! - X: kill the player
//! - I: toggle invincibility
//! - O: toggle the status overlay

mod state;
mod systems;
mod ui;

pub use state::DebugState;

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::systems::{apply_invincibility, handle_debug_hotkeys, update_debug_info_overlay};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                apply_invincibility,
                update_debug_info_overlay.run_if(|state: Res<DebugState>| state.show_info),
            )
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}
