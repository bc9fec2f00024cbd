//! Fx domain: request handling and the follow camera.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::fx::events::{CameraFramingRequest, CameraShakeRequest, EffectRequest, SoundRequest};
use crate::fx::resources::{CameraRig, FxCatalog, MissingFx};
use crate::movement::Player;

/// Logs effect requests. Names missing from the catalog warn once each.
pub(crate) fn handle_effect_requests(
    mut requests: MessageReader<EffectRequest>,
    catalog: Res<FxCatalog>,
    mut missing: ResMut<MissingFx>,
) {
    for request in requests.read() {
        let (effect, verb) = match *request {
            EffectRequest::Play(effect) => (effect, "play"),
            EffectRequest::Stop(effect) => (effect, "stop"),
        };
        if catalog.has_effect(effect) {
            debug!("Effect {}: {}", verb, effect.name());
        } else if missing.first_report(effect.name()) {
            warn!("Effect '{}' is not in the fx catalog", effect.name());
        }
    }
}

pub(crate) fn handle_sound_requests(
    mut requests: MessageReader<SoundRequest>,
    catalog: Res<FxCatalog>,
    mut missing: ResMut<MissingFx>,
) {
    for SoundRequest(sound) in requests.read() {
        if catalog.has_sound(*sound) {
            debug!("Sound: {}", sound.name());
        } else if missing.first_report(sound.name()) {
            warn!("Sound '{}' is not in the fx catalog", sound.name());
        }
    }
}

pub(crate) fn apply_camera_requests(
    mut shakes: MessageReader<CameraShakeRequest>,
    mut framing: MessageReader<CameraFramingRequest>,
    mut rig: ResMut<CameraRig>,
) {
    for request in shakes.read() {
        rig.shake.shake(request.duration, request.magnitude);
    }
    for request in framing.read() {
        match *request {
            CameraFramingRequest::Offset(offset) => rig.target_offset = offset,
            CameraFramingRequest::Zoom(zoom) => rig.target_zoom = zoom,
        }
    }
}

/// Places the camera on the player plus the rig's offset and jitter.
pub(crate) fn follow_player(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera2d>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let jitter = rig.update(time.delta_secs());
    let target = player.translation.truncate() + rig.offset + jitter;

    for (mut transform, mut projection) in &mut camera_query {
        transform.translation.x = target.x;
        transform.translation.y = target.y;
        if let Projection::Orthographic(ortho) = projection.as_mut() {
            ortho.scale = rig.zoom;
        }
    }
}
