//! Checkpoints domain: respawn bookkeeping.

use bevy::prelude::*;

/// The checkpoint the player last touched, if any.
#[derive(Resource, Debug, Default)]
pub struct ActiveCheckpoint(pub Option<Entity>);

impl ActiveCheckpoint {
    /// Returns true if this changed the active checkpoint.
    pub fn activate(&mut self, checkpoint: Entity) -> bool {
        if self.0 == Some(checkpoint) {
            return false;
        }
        self.0 = Some(checkpoint);
        true
    }
}
