//! Tiling schemes: the mapping between geographic space and tile pyramids.

use crate::{Ellipsoid, LonLat, Rectangle, TileCoord};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Debug;

/// Latitude limit of the spherical-Mercator projection, in radians.
///
/// This is the latitude at which the projected plane becomes square
/// (approximately 85.05113 degrees).
pub const MAX_MERCATOR_LAT: f64 = 1.4844222297453324;

/// A discrete pyramid of square tiles over geographic space.
///
/// Level 0 is the coarsest level; each subsequent level doubles the tile
/// count in both directions. Row 0 is the northernmost row.
pub trait TilingScheme: Debug + Send + Sync {
    /// The full geographic extent covered by the scheme, in radians.
    fn rectangle(&self) -> Rectangle;

    /// True for equirectangular schemes, whose native coordinates are
    /// angular rather than projected meters.
    fn is_geographic(&self) -> bool {
        false
    }

    /// Number of tile columns at a zoom level.
    fn columns_at(&self, level: u32) -> u32;

    /// Number of tile rows at a zoom level.
    fn rows_at(&self, level: u32) -> u32;

    /// The tile containing a geographic position at a zoom level.
    ///
    /// Positions outside the scheme's extent are clamped to the nearest
    /// edge tile.
    fn position_to_tile(&self, position: LonLat, level: u32) -> TileCoord;

    /// Convert the scheme's native projected coordinates (meters) to
    /// geographic radians.
    fn unproject(&self, x: f64, y: f64) -> LonLat;
}

/// Map a fraction of the extent to a tile index, clamped to `0..count`.
fn tile_index(fraction: f64, count: u32) -> u32 {
    if fraction <= 0.0 {
        0
    } else {
        ((fraction * count as f64) as u32).min(count - 1)
    }
}

/// Equirectangular (plate carrée) scheme.
///
/// Two columns by one row at level 0, covering the full ±180° × ±90°
/// extent with a linear latitude/longitude mapping.
#[derive(Debug, Clone, Copy)]
pub struct GeographicScheme {
    ellipsoid: Ellipsoid,
}

impl GeographicScheme {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }
}

impl Default for GeographicScheme {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

impl TilingScheme for GeographicScheme {
    fn rectangle(&self) -> Rectangle {
        Rectangle::new(-PI, -FRAC_PI_2, PI, FRAC_PI_2)
    }

    fn is_geographic(&self) -> bool {
        true
    }

    fn columns_at(&self, level: u32) -> u32 {
        2 << level
    }

    fn rows_at(&self, level: u32) -> u32 {
        1 << level
    }

    fn position_to_tile(&self, position: LonLat, level: u32) -> TileCoord {
        let rect = self.rectangle();
        let x_frac = (position.lon - rect.west) / rect.width();
        let y_frac = (rect.north - position.lat) / rect.height();

        TileCoord::new(
            level,
            tile_index(x_frac, self.columns_at(level)),
            tile_index(y_frac, self.rows_at(level)),
        )
    }

    fn unproject(&self, x: f64, y: f64) -> LonLat {
        // Equirectangular projected meters are angle times sphere radius.
        let radius = self.ellipsoid.maximum_radius();
        LonLat::new(x / radius, y / radius)
    }
}

/// Spherical-Mercator (Google/OSM) scheme.
///
/// One tile at level 0, covering ±180° × ±85.05113°.
#[derive(Debug, Clone, Copy)]
pub struct WebMercatorScheme {
    ellipsoid: Ellipsoid,
}

impl WebMercatorScheme {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }
}

impl Default for WebMercatorScheme {
    fn default() -> Self {
        Self::new(Ellipsoid::WGS84)
    }
}

impl TilingScheme for WebMercatorScheme {
    fn rectangle(&self) -> Rectangle {
        Rectangle::new(-PI, -MAX_MERCATOR_LAT, PI, MAX_MERCATOR_LAT)
    }

    fn columns_at(&self, level: u32) -> u32 {
        1 << level
    }

    fn rows_at(&self, level: u32) -> u32 {
        1 << level
    }

    fn position_to_tile(&self, position: LonLat, level: u32) -> TileCoord {
        let n = self.columns_at(level);
        let x_frac = (position.lon + PI) / (2.0 * PI);
        // Row fraction through the Mercator projection, 0 at the north edge.
        let y_frac = (1.0 - position.lat.tan().asinh() / PI) / 2.0;

        TileCoord::new(level, tile_index(x_frac, n), tile_index(y_frac, n))
    }

    fn unproject(&self, x: f64, y: f64) -> LonLat {
        let radius = self.ellipsoid.maximum_radius();
        LonLat::new(x / radius, (y / radius).sinh().atan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEB_MERCATOR_EXTENT: f64 = 20037508.342789244;

    #[test]
    fn test_geographic_level_zero_layout() {
        let scheme = GeographicScheme::default();
        assert_eq!(scheme.columns_at(0), 2);
        assert_eq!(scheme.rows_at(0), 1);
        assert_eq!(scheme.columns_at(3), 16);
        assert_eq!(scheme.rows_at(3), 8);
    }

    #[test]
    fn test_web_mercator_level_zero_layout() {
        let scheme = WebMercatorScheme::default();
        assert_eq!(scheme.columns_at(0), 1);
        assert_eq!(scheme.rows_at(0), 1);
        assert_eq!(scheme.columns_at(5), 32);
    }

    #[test]
    fn test_native_coordinate_kind() {
        assert!(GeographicScheme::default().is_geographic());
        assert!(!WebMercatorScheme::default().is_geographic());
    }

    #[test]
    fn test_geographic_position_to_tile() {
        let scheme = GeographicScheme::default();

        // Western hemisphere at level 0 is column 0, eastern is column 1.
        let west = scheme.position_to_tile(LonLat::from_degrees(-90.0, 0.0), 0);
        assert_eq!((west.x, west.y), (0, 0));
        let east = scheme.position_to_tile(LonLat::from_degrees(90.0, 0.0), 0);
        assert_eq!((east.x, east.y), (1, 0));

        // Level 1: 4 columns, 2 rows.
        let tile = scheme.position_to_tile(LonLat::from_degrees(-90.0, 45.0), 1);
        assert_eq!((tile.x, tile.y), (1, 0));
        let tile = scheme.position_to_tile(LonLat::from_degrees(90.0, -45.0), 1);
        assert_eq!((tile.x, tile.y), (3, 1));
    }

    #[test]
    fn test_web_mercator_position_to_tile_nyc() {
        // New York City at zoom 10.
        let scheme = WebMercatorScheme::default();
        let tile = scheme.position_to_tile(LonLat::from_degrees(-74.0060, 40.7128), 10);
        assert_eq!(tile.x, 301);
        assert_eq!(tile.y, 384);
    }

    #[test]
    fn test_position_to_tile_clamps_at_edges() {
        let scheme = WebMercatorScheme::default();

        let ne = scheme.position_to_tile(LonLat::from_degrees(180.0, 85.06), 2);
        assert_eq!((ne.x, ne.y), (3, 0));
        let sw = scheme.position_to_tile(LonLat::from_degrees(-180.0, -85.06), 2);
        assert_eq!((sw.x, sw.y), (0, 3));
    }

    #[test]
    fn test_web_mercator_unproject_extent() {
        let scheme = WebMercatorScheme::default();

        let ne = scheme.unproject(WEB_MERCATOR_EXTENT, WEB_MERCATOR_EXTENT);
        assert!((ne.lon - PI).abs() < 1e-9);
        assert!((ne.lat - MAX_MERCATOR_LAT).abs() < 1e-9);

        let origin = scheme.unproject(0.0, 0.0);
        assert_eq!((origin.lon, origin.lat), (0.0, 0.0));
    }

    #[test]
    fn test_geographic_unproject() {
        let scheme = GeographicScheme::default();
        let position = scheme.unproject(PI * 6_378_137.0, 0.0);
        assert!((position.lon - PI).abs() < 1e-12);
        assert_eq!(position.lat, 0.0);
    }
}
