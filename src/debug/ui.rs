//! Debug domain: controller status overlay.

use bevy::prelude::*;

use crate::movement::controller::PlayerController;

/// Marker for the status overlay text
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new(""),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn status_text(controller: &PlayerController) -> String {
    let body = &controller.body;
    let contacts = &body.contacts;
    format!(
        "Pos: ({:.0}, {:.0})  Vel: ({:.0}, {:.0})\n\
         State: {:?}  Jump: {:?}\n\
         Grounded: {}  Wall: {:?}  Sliding: {}\n\
         Air jumps: {}  Dashes: {}\n\
         HP: {}/{}  Invincible: {}\n\
         Abilities: {:?}",
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        body.state,
        controller.jump_phase(),
        contacts.grounded,
        contacts.wall_side(),
        controller.wall_slide.active,
        controller.jump.remaining_air_jumps,
        controller.dash.remaining,
        controller.health.current,
        controller.health.max,
        controller.health.is_invincible(),
        controller.abilities,
    )
}
