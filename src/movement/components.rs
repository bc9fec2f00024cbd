//! Movement domain: components and physics layers for the player body.

use avian2d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::controller::{ContactEvent, DamageCause, PlayerController};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors
    Ground,
    /// Wall surfaces
    Wall,
    /// Moving platforms; solid, and carry the player
    Platform,
    /// Player character
    Player,
    /// Sensors (checkpoints, pickups) - should not block movement
    Sensor,
    /// Spikes and other damaging sensors
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

/// The player's simulation state. Lives on the player entity next to its
/// rigid body.
#[derive(Component, Debug)]
pub struct Controller(pub PlayerController);

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Kinematic body whose horizontal velocity is carried by the player while
/// standing on it.
#[derive(Component, Debug, Default)]
pub struct MovingPlatform;

/// Damages the player on contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub damage: i32,
    /// Push applied on a hit; x points away from the hazard
    pub knockback: Vec2,
}

/// Contact events gathered from the physics engine since the last step.
#[derive(Resource, Debug, Default)]
pub struct ContactBuffer(pub Vec<ContactEvent>);

/// Asks the controller to kill the player on its next step.
#[derive(Debug, Clone, Copy)]
pub struct KillRequest {
    pub cause: DamageCause,
}

impl Message for KillRequest {}
