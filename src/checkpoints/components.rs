//! Checkpoints domain: level markers the player respawns at or collects.

use bevy::prelude::*;

use crate::movement::controller::Ability;

/// Respawn point activated by touching its sensor.
#[derive(Component, Debug, Default)]
pub struct Checkpoint {
    pub label: String,
}

/// Where the level's run begins; used until a checkpoint is active.
#[derive(Component, Debug, Default)]
pub struct StartTeleporter;

/// Last-resort spawn position. Also where the player first appears.
#[derive(Component, Debug, Default)]
pub struct SpawnPoint;

/// Grants an ability on touch, then disappears.
#[derive(Component, Debug)]
pub struct AbilityPickup {
    pub ability: Ability,
}
