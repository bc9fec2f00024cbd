//! Level domain: components for the test room.

use bevy::prelude::*;

/// Loops a kinematic body through its waypoints at a constant speed.
#[derive(Component, Debug, Clone)]
pub struct PlatformPath {
    pub waypoints: Vec<Vec2>,
    pub speed: f32,
    pub target: usize,
}

impl PlatformPath {
    pub fn new(waypoints: Vec<Vec2>, speed: f32) -> Self {
        Self {
            waypoints,
            speed,
            target: 0,
        }
    }

    pub fn target_point(&self) -> Option<Vec2> {
        self.waypoints.get(self.target).copied()
    }

    pub fn advance(&mut self) {
        if !self.waypoints.is_empty() {
            self.target = (self.target + 1) % self.waypoints.len();
        }
    }
}
