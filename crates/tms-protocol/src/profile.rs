//! TMS tiling profile identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The tiling convention declared by a TMS capabilities document.
///
/// The profile determines both the tiling layout (equirectangular vs.
/// spherical-Mercator) and how the document's tile and bounding-box
/// coordinates are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TilingProfile {
    /// Legacy geodetic profile (swapped axes, coordinates in degrees).
    Geodetic,
    /// Legacy mercator profile (swapped axes, coordinates in degrees).
    Mercator,
    /// Standard global-geodetic profile.
    GlobalGeodetic,
    /// Standard global-mercator profile.
    GlobalMercator,
}

impl TilingProfile {
    /// Parse a `profile` attribute value.
    pub fn from_tms_string(s: &str) -> Result<Self, ProfileParseError> {
        match s.to_lowercase().as_str() {
            "geodetic" => Ok(TilingProfile::Geodetic),
            "mercator" => Ok(TilingProfile::Mercator),
            "global-geodetic" => Ok(TilingProfile::GlobalGeodetic),
            "global-mercator" => Ok(TilingProfile::GlobalMercator),
            _ => Err(ProfileParseError::Unsupported(s.to_string())),
        }
    }

    /// True for the legacy profiles that encode tile and bounding-box
    /// coordinates with the X and Y axes swapped (the document's horizontal
    /// axis is latitude-like).
    pub fn flips_axes(&self) -> bool {
        matches!(self, TilingProfile::Geodetic | TilingProfile::Mercator)
    }

    /// True when the profile addresses tiles in an equirectangular layout.
    pub fn is_geographic(&self) -> bool {
        matches!(self, TilingProfile::Geodetic | TilingProfile::GlobalGeodetic)
    }
}

impl fmt::Display for TilingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TilingProfile::Geodetic => "geodetic",
            TilingProfile::Mercator => "mercator",
            TilingProfile::GlobalGeodetic => "global-geodetic",
            TilingProfile::GlobalMercator => "global-mercator",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileParseError {
    #[error("Unsupported tiling profile: {0}")]
    Unsupported(String),
}
