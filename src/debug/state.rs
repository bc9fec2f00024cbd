//! Debug domain: state for dev tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Keeps the player at full health and invincible
    pub invincible: bool,
    /// Whether the controller status overlay is shown
    pub show_info: bool,
}
