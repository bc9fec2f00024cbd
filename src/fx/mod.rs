//! Fx domain: effect, sound and camera requests from the player controller.
//!
//! Nothing here renders particles or plays audio. Requests are checked against
//! the loaded [`FxCatalog`] and logged; camera requests drive the follow camera.

mod events;
mod resources;
mod systems;


pub use events::{
    CameraFramingRequest, CameraRequests, CameraShakeRequest, EffectRequest, SoundRequest,
};
pub use resources::{CameraRig, FxCatalog, MissingFx, ScreenShake};

use bevy::prelude::*;

use crate::core::GameState;
use crate::fx::systems::{
    apply_camera_requests, follow_player, handle_effect_requests, handle_sound_requests,
};

pub struct FxPlugin;

impl Plugin for FxPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EffectRequest>()
            .add_message::<SoundRequest>()
            .add_message::<CameraShakeRequest>()
            .add_message::<CameraFramingRequest>()
            .init_resource::<FxCatalog>()
            .init_resource::<MissingFx>()
            .init_resource::<CameraRig>()
            .add_systems(
                Update,
                (
                    handle_effect_requests,
                    handle_sound_requests,
                    (apply_camera_requests, follow_player).chain(),
                )
                    .run_if(in_state(GameState::Run)),
            );
    }
}
