//! Capabilities-to-configuration resolution.
//!
//! Turns a parsed capabilities document (or its absence) plus the caller's
//! overrides into the canonical [`ResolvedConfig`]. This module holds all of
//! the decision logic of the client: override precedence, profile and
//! coordinate-convention selection, rectangle derivation and clamping, and
//! the minimum-level relaxation heuristic.

use std::sync::Arc;

use tracing::debug;

use tms_common::{GeographicScheme, LonLat, Rectangle, TilingScheme, WebMercatorScheme};
use tms_protocol::{Capabilities, TilingProfile};

use crate::path::{join_url, CAPABILITIES_FILE};
use crate::{ResolvedConfig, TmsError, TmsOptions};

/// Default tile extension when neither document nor override supplies one.
const DEFAULT_EXTENSION: &str = "png";

/// Default tile pixel size.
const DEFAULT_TILE_SIZE: u32 = 256;

/// Maximum number of tiles the minimum level may span before it is widened
/// to level 0.
const MAX_MINIMUM_LEVEL_TILES: u32 = 4;

/// Resolve the canonical configuration for a tile pyramid.
///
/// `capabilities` is the parsed document, or `None` when it could not be
/// obtained or parsed; the latter selects the fallback defaults.
pub fn resolve(
    base_url: &str,
    capabilities: Option<&Capabilities>,
    options: &TmsOptions,
) -> Result<ResolvedConfig, TmsError> {
    match capabilities {
        Some(doc) => resolve_document(base_url, doc, options),
        None => Ok(resolve_fallback(base_url, options)),
    }
}

/// Resolution against a present capabilities document.
fn resolve_document(
    base_url: &str,
    doc: &Capabilities,
    options: &TmsOptions,
) -> Result<ResolvedConfig, TmsError> {
    let source_url = join_url(base_url, CAPABILITIES_FILE);

    // Scalar overrides win over document values. A document without a
    // tileformat element cannot determine the pixel geometry; only a
    // complete set of overrides rescues that case.
    let (file_extension, tile_width, tile_height) = match &doc.tile_format {
        Some(format) => (
            options
                .file_extension
                .clone()
                .unwrap_or_else(|| format.extension.clone()),
            options.tile_width.unwrap_or(format.width),
            options.tile_height.unwrap_or(format.height),
        ),
        None => match (&options.file_extension, options.tile_width, options.tile_height) {
            (Some(extension), Some(width), Some(height)) => (extension.clone(), width, height),
            _ => return Err(TmsError::MissingTileFormat { source_url }),
        },
    };

    let tile_sets = doc
        .tile_sets
        .as_ref()
        .ok_or_else(|| TmsError::MissingTileSets {
            source_url: source_url.clone(),
        })?;

    // The first and last tileset entries, in document order, supply the
    // level range. The document is trusted to list them ascending.
    let minimum_level = match options.minimum_level {
        Some(level) => level,
        None => {
            tile_sets
                .entries
                .first()
                .map(|entry| entry.order)
                .ok_or_else(|| TmsError::MissingTileSets {
                    source_url: source_url.clone(),
                })?
        }
    };
    let maximum_level = match options.maximum_level {
        Some(level) => level,
        None => {
            tile_sets
                .entries
                .last()
                .map(|entry| entry.order)
                .ok_or_else(|| TmsError::MissingTileSets {
                    source_url: source_url.clone(),
                })?
        }
    };

    // The legacy geodetic/mercator profiles swap the tile and bounding-box
    // axes; the profile string itself may be unknown when the caller
    // supplies a tiling scheme, in which case no flip applies.
    let profile = TilingProfile::from_tms_string(&tile_sets.profile).ok();
    let flip_xy = profile.map_or(false, |p| p.flips_axes());

    let tiling_scheme: Arc<dyn TilingScheme> = match &options.tiling_scheme {
        Some(scheme) => Arc::clone(scheme),
        None => {
            let profile = profile.ok_or_else(|| TmsError::UnsupportedProfile {
                profile: tile_sets.profile.clone(),
                source_url: source_url.clone(),
            })?;
            let ellipsoid = options.ellipsoid.unwrap_or_default();
            if profile.is_geographic() {
                Arc::new(GeographicScheme::new(ellipsoid))
            } else {
                Arc::new(WebMercatorScheme::new(ellipsoid))
            }
        }
    };

    let rectangle = match options.rectangle {
        Some(rectangle) => rectangle,
        None => match &doc.bounding_box {
            Some(bounds) => {
                if flip_xy {
                    // Legacy profiles: the document's horizontal axis is
                    // latitude-like and values are always degrees.
                    Rectangle::from_corners(
                        LonLat::from_degrees(bounds.min_y, bounds.min_x),
                        LonLat::from_degrees(bounds.max_y, bounds.max_x),
                    )
                } else if tiling_scheme.is_geographic() {
                    Rectangle::from_degrees(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)
                } else {
                    // Native projected units, unprojected through the scheme.
                    Rectangle::from_corners(
                        tiling_scheme.unproject(bounds.min_x, bounds.min_y),
                        tiling_scheme.unproject(bounds.max_x, bounds.max_y),
                    )
                }
            }
            None => {
                debug!(%source_url, "document has no bounding box, using the scheme extent");
                tiling_scheme.rectangle()
            }
        },
    };

    // Clamping only tightens, never widens.
    let rectangle = rectangle.clamp_to(&tiling_scheme.rectangle());

    let minimum_level = relax_minimum_level(tiling_scheme.as_ref(), &rectangle, minimum_level);

    Ok(ResolvedConfig {
        base_url: base_url.to_string(),
        file_extension,
        tile_width,
        tile_height,
        minimum_level,
        maximum_level: Some(maximum_level),
        tiling_scheme,
        rectangle,
        flip_xy,
    })
}

/// Fallback defaults used when the capabilities document is unreachable or
/// unparseable.
///
/// The minimum-level relaxation never applies here; there is no
/// document-derived tile geometry to check against.
fn resolve_fallback(base_url: &str, options: &TmsOptions) -> ResolvedConfig {
    let tiling_scheme: Arc<dyn TilingScheme> = match &options.tiling_scheme {
        Some(scheme) => Arc::clone(scheme),
        None => Arc::new(WebMercatorScheme::new(options.ellipsoid.unwrap_or_default())),
    };

    let rectangle = options
        .rectangle
        .unwrap_or_else(|| tiling_scheme.rectangle())
        .clamp_to(&tiling_scheme.rectangle());

    ResolvedConfig {
        base_url: base_url.to_string(),
        file_extension: options
            .file_extension
            .clone()
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        tile_width: options.tile_width.unwrap_or(DEFAULT_TILE_SIZE),
        tile_height: options.tile_height.unwrap_or(DEFAULT_TILE_SIZE),
        minimum_level: options.minimum_level.unwrap_or(0),
        maximum_level: options.maximum_level,
        tiling_scheme,
        rectangle,
        flip_xy: false,
    }
}

/// Widen an overly coarse minimum level.
///
/// When the rectangle spans more than `MAX_MINIMUM_LEVEL_TILES` tiles at
/// the configured minimum level, the minimum drops to level 0 so startup
/// does not fan out into a large top-level tile fetch.
fn relax_minimum_level(
    scheme: &dyn TilingScheme,
    rectangle: &Rectangle,
    minimum_level: u32,
) -> u32 {
    let sw = scheme.position_to_tile(rectangle.southwest(), minimum_level);
    let ne = scheme.position_to_tile(rectangle.northeast(), minimum_level);
    let tile_count = (sw.x.abs_diff(ne.x) + 1) * (sw.y.abs_diff(ne.y) + 1);

    if tile_count > MAX_MINIMUM_LEVEL_TILES {
        debug!(
            minimum_level,
            tile_count, "minimum level spans too many tiles, widening to level 0"
        );
        0
    } else {
        minimum_level
    }
}
