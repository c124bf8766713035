//! Caller-supplied configuration for a TMS imagery source.

use std::sync::Arc;
use tms_common::{Ellipsoid, Rectangle, TilingScheme};

/// Options for connecting to a TMS tile pyramid.
///
/// Every field except `url` is an override: when present it takes
/// precedence over the matching value in the capabilities document.
#[derive(Debug, Clone, Default)]
pub struct TmsOptions {
    /// Base location of the tile pyramid (required).
    pub url: String,

    /// Tile file extension, without the leading dot.
    pub file_extension: Option<String>,

    /// Tile width in pixels.
    pub tile_width: Option<u32>,

    /// Tile height in pixels.
    pub tile_height: Option<u32>,

    /// Lowest zoom level to address.
    pub minimum_level: Option<u32>,

    /// Highest zoom level to address.
    pub maximum_level: Option<u32>,

    /// Geographic bounding rectangle, in radians.
    pub rectangle: Option<Rectangle>,

    /// Tiling scheme to use instead of the one implied by the document's
    /// profile.
    pub tiling_scheme: Option<Arc<dyn TilingScheme>>,

    /// Shape parameter used when a default tiling scheme must be built.
    pub ellipsoid: Option<Ellipsoid>,
}

impl TmsOptions {
    /// Options with only the base URL set.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}
