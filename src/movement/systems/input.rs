//! Movement domain: keyboard sampling and per-frame controller input.

use bevy::prelude::*;

use crate::movement::{Controller, MovementInput};

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const DASH_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::KeyJ];

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (fast drop)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed = keyboard.any_just_pressed(JUMP_KEYS);
    input.jump_held = keyboard.any_pressed(JUMP_KEYS);
    input.jump_just_released = keyboard.any_just_released(JUMP_KEYS);
    input.dash_just_pressed = keyboard.any_just_pressed(DASH_KEYS);
    input.restart_just_pressed = keyboard.just_pressed(KeyCode::KeyR);
}

/// Hands this frame's input to every controller; press edges arm the jump and
/// dash buffers here, once per rendered frame.
pub(crate) fn sample_input(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut query: Query<&mut Controller>,
) {
    let dt = time.delta_secs();
    for mut controller in &mut query {
        controller.0.frame(&*input, dt);
    }
}
