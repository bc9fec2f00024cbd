//! Loader for RON content files at startup.

use std::fs;
use std::path::Path;

use ron::Options;
use thiserror::Error;

use crate::fx::FxCatalog;
use crate::movement::MovementTuning;

pub const CONTROLLER_FILE: &str = "controller.ron";
pub const FX_FILE: &str = "fx.ron";

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to load {file}: IO error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load {file}: Parse error: {source}")]
    Parse {
        file: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct from a string.
pub fn parse_single<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Parse {
            file: file.to_string(),
            source,
        })
}

/// Load a single RON struct from disk.
pub fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: file.clone(),
        source,
    })?;
    parse_single(&file, &contents)
}

pub fn load_movement_tuning(base_path: &Path) -> Result<MovementTuning, ContentLoadError> {
    load_single_file(&base_path.join(CONTROLLER_FILE))
}

pub fn load_fx_catalog(base_path: &Path) -> Result<FxCatalog, ContentLoadError> {
    load_single_file(&base_path.join(FX_FILE))
}
