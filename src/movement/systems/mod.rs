//! Movement domain: system modules for the player controller.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::collect_contacts;
pub(crate) use input::{read_input, sample_input};
pub(crate) use movement::{
    apply_tuning_changes, step_controllers, sync_from_physics, update_player_sprite,
};
