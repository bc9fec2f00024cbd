//! Fx domain: requests emitted by the player controller.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::movement::controller::{CameraSink, EffectId, EffectSink, SoundId, SoundSink};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectRequest {
    Play(EffectId),
    Stop(EffectId),
}

impl Message for EffectRequest {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundRequest(pub SoundId);

impl Message for SoundRequest {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraShakeRequest {
    pub duration: f32,
    pub magnitude: f32,
}

impl Message for CameraShakeRequest {}

/// Target framing for the follow camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraFramingRequest {
    Offset(Vec2),
    Zoom(f32),
}

impl Message for CameraFramingRequest {}

impl EffectSink for MessageWriter<'_, EffectRequest> {
    fn play_effect(&mut self, effect: EffectId) {
        self.write(EffectRequest::Play(effect));
    }

    fn stop_effect(&mut self, effect: EffectId) {
        self.write(EffectRequest::Stop(effect));
    }
}

impl SoundSink for MessageWriter<'_, SoundRequest> {
    fn play_sound(&mut self, sound: SoundId) {
        self.write(SoundRequest(sound));
    }
}

/// Camera sink backed by the camera request messages.
#[derive(SystemParam)]
pub struct CameraRequests<'w> {
    shakes: MessageWriter<'w, CameraShakeRequest>,
    framing: MessageWriter<'w, CameraFramingRequest>,
}

impl CameraSink for CameraRequests<'_> {
    fn shake(&mut self, duration: f32, magnitude: f32) {
        self.shakes.write(CameraShakeRequest {
            duration,
            magnitude,
        });
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.framing.write(CameraFramingRequest::Offset(offset));
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.framing.write(CameraFramingRequest::Zoom(zoom));
    }
}
