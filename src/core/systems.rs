//! Core domain: boot flow, camera and pause systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::resources::{GameplayPaused, MENU_PAUSE};
use crate::core::state::GameState;

pub(crate) fn transition_to_run(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        let now_paused = paused.toggle(MENU_PAUSE);
        info!("Gameplay {}", if now_paused { "paused" } else { "resumed" });
    }
}

/// Keeps the physics clock in step with the pause sources.
pub(crate) fn sync_physics_pause(
    paused: Res<GameplayPaused>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    if !paused.is_changed() {
        return;
    }
    if paused.is_paused() {
        physics_time.pause();
    } else {
        physics_time.unpause();
    }
}
