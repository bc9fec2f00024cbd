//! Fx domain: effect catalog and camera rig state.

use std::collections::HashSet;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::movement::controller::{EffectId, SoundId};

/// Names of the effects and sounds the presentation layer can actually play.
/// Loaded from `assets/data/fx.ron`.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FxCatalog {
    pub effects: HashSet<String>,
    pub sounds: HashSet<String>,
}

impl Default for FxCatalog {
    fn default() -> Self {
        Self {
            effects: EffectId::ALL.iter().map(|e| e.name().to_string()).collect(),
            sounds: SoundId::ALL.iter().map(|s| s.name().to_string()).collect(),
        }
    }
}

impl FxCatalog {
    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.effects.contains(effect.name())
    }

    pub fn has_sound(&self, sound: SoundId) -> bool {
        self.sounds.contains(sound.name())
    }
}

/// Names already reported as missing from the catalog.
#[derive(Resource, Debug, Default)]
pub struct MissingFx {
    reported: HashSet<&'static str>,
}

impl MissingFx {
    /// Returns true the first time a name is seen.
    pub fn first_report(&mut self, name: &'static str) -> bool {
        self.reported.insert(name)
    }
}

/// Smoothed follow-camera state.
#[derive(Resource, Debug)]
pub struct CameraRig {
    pub offset: Vec2,
    pub target_offset: Vec2,
    pub zoom: f32,
    pub target_zoom: f32,
    /// Lerp rate per second toward the targets
    pub smoothing: f32,
    pub shake: ScreenShake,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            target_offset: Vec2::ZERO,
            zoom: 1.0,
            target_zoom: 1.0,
            smoothing: 6.0,
            shake: ScreenShake::default(),
        }
    }
}

impl CameraRig {
    /// Moves the framing toward its targets and returns the shake jitter.
    pub fn update(&mut self, dt: f32) -> Vec2 {
        let t = (self.smoothing * dt).clamp(0.0, 1.0);
        self.offset = self.offset.lerp(self.target_offset, t);
        self.zoom += (self.target_zoom - self.zoom) * t;
        self.shake.update(dt)
    }
}

/// Decaying camera jitter. The jitter source is seeded so runs replay identically.
#[derive(Debug)]
pub struct ScreenShake {
    pub magnitude: f32,
    pub duration: f32,
    pub timer: f32,
    rng: ChaCha8Rng,
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl ScreenShake {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            magnitude: 0.0,
            duration: 0.0,
            timer: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A weaker shake never cuts a stronger one short.
    pub fn shake(&mut self, duration: f32, magnitude: f32) {
        if magnitude >= self.magnitude || self.timer <= 0.0 {
            self.magnitude = magnitude;
            self.duration = duration;
            self.timer = duration;
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn update(&mut self, dt: f32) -> Vec2 {
        if self.timer <= 0.0 {
            return Vec2::ZERO;
        }

        self.timer = (self.timer - dt).max(0.0);
        if self.timer <= 0.0 {
            self.magnitude = 0.0;
            return Vec2::ZERO;
        }

        let strength = self.magnitude * self.timer / self.duration;
        Vec2::new(
            self.rng.random_range(-1.0_f32..=1.0) * strength,
            self.rng.random_range(-1.0_f32..=1.0) * strength,
        )
    }
}
