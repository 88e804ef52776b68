//! Startup loading of the read-only reference datasets.
//!
//! Two JSON fixtures are loaded once at process start and shared immutably
//! across requests: the simulated wildlife track dataset and the poaching
//! hotspot reference list.

use std::path::Path;

use thiserror::Error;
use wildguard_wildlife_models::{HotspotSet, TrackRecord};

/// Default location of the track fixture, relative to the working directory.
pub const DEFAULT_TRACKS_PATH: &str = "data/wildguard_simulated_tracks.json";

/// Default location of the hotspot fixture.
pub const DEFAULT_HOTSPOTS_PATH: &str = "data/hotspots.json";

/// Errors from fixture loading.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file could not be read.
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        /// The fixture path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON for the expected shape.
    #[error("Failed to parse fixture {path}: {source}")]
    Parse {
        /// The fixture path.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Loads the wildlife track dataset.
///
/// # Errors
///
/// Returns [`FixtureError`] if the file is missing or malformed.
pub fn load_tracks(path: &Path) -> Result<Vec<TrackRecord>, FixtureError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Loads the hotspot reference set (wrapper object with a `hotspots` array).
///
/// # Errors
///
/// Returns [`FixtureError`] if the file is missing or malformed.
pub fn load_hotspots(path: &Path) -> Result<HotspotSet, FixtureError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: path.display().to_string(),
        source,
    })
}
