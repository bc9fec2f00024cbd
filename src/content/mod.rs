//! Content domain: RON tuning and fx catalog loading.

mod loader;
mod validation;


pub use loader::{ContentLoadError, load_fx_catalog, load_movement_tuning, parse_single};
pub use validation::{ConfigWarning, sanitize_tuning};

use std::path::Path;

use bevy::prelude::*;

use crate::fx::FxCatalog;
use crate::movement::MovementTuning;

/// Directory holding the RON data files, relative to the working directory.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

/// Replaces the default tuning and fx catalog with the on-disk versions.
/// A file that fails to load leaves the defaults in place.
fn load_content(mut commands: Commands) {
    let base_path = Path::new(DATA_DIR);

    match load_movement_tuning(base_path) {
        Ok(mut tuning) => {
            for warning in sanitize_tuning(&mut tuning) {
                warn!("Controller tuning: {}", warning);
            }
            info!(
                "Loaded controller tuning: jump height {:.1}, reach {:.1}",
                tuning.single_jump_height(),
                tuning.max_reachable_height()
            );
            commands.insert_resource(tuning);
        }
        Err(e) => {
            error!("{}; using default tuning", e);
            commands.insert_resource(MovementTuning::default());
        }
    }

    match load_fx_catalog(base_path) {
        Ok(catalog) => {
            info!(
                "Loaded fx catalog: {} effects, {} sounds",
                catalog.effects.len(),
                catalog.sounds.len()
            );
            commands.insert_resource(catalog);
        }
        Err(e) => {
            error!("{}; using default fx catalog", e);
            commands.insert_resource(FxCatalog::default());
        }
    }
}
