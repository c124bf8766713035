//! The resolved, immutable configuration of a ready provider.

use std::sync::Arc;
use tms_common::{Rectangle, TilingScheme};

/// Canonical configuration of a TMS tile pyramid.
///
/// Produced exactly once per provider by the metadata resolver (or its
/// fallback path) and never mutated afterwards; readers may share it freely
/// without synchronization.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base location tile paths are joined onto.
    pub base_url: String,

    /// Tile file extension, without the leading dot.
    pub file_extension: String,

    /// Tile width in pixels.
    pub tile_width: u32,

    /// Tile height in pixels.
    pub tile_height: u32,

    /// Lowest addressable zoom level.
    pub minimum_level: u32,

    /// Highest addressable zoom level; `None` means no ceiling is enforced
    /// (fallback path only).
    pub maximum_level: Option<u32>,

    /// The tiling scheme addressing the pyramid.
    pub tiling_scheme: Arc<dyn TilingScheme>,

    /// Geographic bounding rectangle in radians, clamped to the tiling
    /// scheme's own extent.
    pub rectangle: Rectangle,

    /// True when the source document encodes tile and bounding-box
    /// coordinates with the X and Y axes swapped (legacy convention).
    pub flip_xy: bool,
}
