//! Debug domain: hotkeys and the status overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay, status_text};
use crate::movement::controller::{Ability, DamageCause};
use crate::movement::{Controller, KillRequest, Player};

const ALL_ABILITIES: [Ability; 5] = [
    Ability::DoubleJump,
    Ability::WallSlide,
    Ability::WallJump,
    Ability::Dash,
    Ability::FallDamage,
];

/// Ctrl+key shortcuts for testing the controller
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut kills: MessageWriter<KillRequest>,
    mut player_query: Query<&mut Controller, With<Player>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+G: Grant every ability
    if keyboard.just_pressed(KeyCode::KeyG) {
        for mut controller in &mut player_query {
            for ability in ALL_ABILITIES {
                controller.0.grant_ability(ability);
            }
        }
        info!("[DEBUG] Granted all abilities");
    }

    // Ctrl+X: Kill the player
    if keyboard.just_pressed(KeyCode::KeyX) {
        kills.write(KillRequest {
            cause: DamageCause::Scripted,
        });
        info!("[DEBUG] Kill requested");
    }

    // Ctrl+I: Toggle invincibility
    if keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        info!(
            "[DEBUG] Invincibility {}",
            if debug_state.invincible { "ON" } else { "OFF" }
        );
    }

    // Ctrl+O: Toggle status overlay
    if keyboard.just_pressed(KeyCode::KeyO) {
        debug_state.show_info = !debug_state.show_info;
        if debug_state.show_info {
            spawn_debug_info_overlay(&mut commands);
        } else {
            for entity in &existing_overlay {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Keeps the player topped up while debug invincibility is on
pub(crate) fn apply_invincibility(
    debug_state: Res<DebugState>,
    mut player_query: Query<&mut Controller, With<Player>>,
) {
    if !debug_state.invincible {
        return;
    }

    for mut controller in &mut player_query {
        let health = &mut controller.0.health;
        if health.is_dead() {
            continue;
        }
        health.current = health.max;
        health.invincibility.extend(0.1);
    }
}

pub(crate) fn update_debug_info_overlay(
    player_query: Query<&Controller, With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    let (Some(controller), Ok(mut text)) = (player_query.iter().next(), overlay_query.single_mut())
    else {
        return;
    };
    **text = status_text(&controller.0);
}
