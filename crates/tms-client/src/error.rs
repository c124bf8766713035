//! Error types for the TMS client.

use thiserror::Error;

/// Result type alias using TmsError.
pub type TmsResult<T> = Result<T, TmsError>;

/// Primary error type for TMS client operations.
///
/// The configuration variants are fatal: the provider never becomes ready
/// and there is no retry. Transport and document-parse failures are not
/// represented here because they are recovered locally through the fallback
/// defaults.
#[derive(Debug, Error)]
pub enum TmsError {
    // === Fatal configuration errors ===
    #[error("Unsupported tiling profile '{profile}' in {source_url}")]
    UnsupportedProfile { profile: String, source_url: String },

    #[error(
        "Capabilities document at {source_url} has no tileformat element \
         and the overrides do not supply extension, width and height"
    )]
    MissingTileFormat { source_url: String },

    #[error("Capabilities document at {source_url} lists no tilesets")]
    MissingTileSets { source_url: String },

    // === Addressing errors ===
    #[error(
        "Tile level {level} is outside the supported range [{minimum}, {max}]",
        max = fmt_level_ceiling(.maximum)
    )]
    LevelOutOfRange {
        level: u32,
        minimum: u32,
        maximum: Option<u32>,
    },

    #[error("Tile address {x},{y} does not exist at level {level}")]
    TileOutOfRange { x: u32, y: u32, level: u32 },
}

fn fmt_level_ceiling(maximum: &Option<u32>) -> String {
    match maximum {
        Some(level) => level.to_string(),
        None => "unbounded".to_string(),
    }
}
