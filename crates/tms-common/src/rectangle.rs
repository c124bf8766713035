//! Geographic rectangles and positions, in radians.

use serde::{Deserialize, Serialize};

/// A geographic position (longitude/latitude) in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Create a position from radian values.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Create a position from degree values.
    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self {
            lon: lon.to_radians(),
            lat: lat.to_radians(),
        }
    }
}

/// A geographic bounding rectangle in radians.
///
/// Invariant: `west <= east` and `south <= north`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Rectangle {
    /// Create a rectangle from radian edge values.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Create a rectangle from degree edge values.
    pub fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: west.to_radians(),
            south: south.to_radians(),
            east: east.to_radians(),
            north: north.to_radians(),
        }
    }

    /// Create a rectangle spanning two corner positions.
    pub fn from_corners(southwest: LonLat, northeast: LonLat) -> Self {
        Self {
            west: southwest.lon,
            south: southwest.lat,
            east: northeast.lon,
            north: northeast.lat,
        }
    }

    /// Angular width in radians.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Angular height in radians.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// The southwest corner.
    pub fn southwest(&self) -> LonLat {
        LonLat::new(self.west, self.south)
    }

    /// The northeast corner.
    pub fn northeast(&self) -> LonLat {
        LonLat::new(self.east, self.north)
    }

    /// Check if a position is contained within this rectangle.
    pub fn contains(&self, position: LonLat) -> bool {
        position.lon >= self.west
            && position.lon <= self.east
            && position.lat >= self.south
            && position.lat <= self.north
    }

    /// Clamp each edge independently so the rectangle does not exceed
    /// `bounds`. Clamping only tightens; a rectangle already inside
    /// `bounds` is returned unchanged.
    pub fn clamp_to(&self, bounds: &Rectangle) -> Rectangle {
        Rectangle {
            west: self.west.max(bounds.west),
            south: self.south.max(bounds.south),
            east: self.east.min(bounds.east),
            north: self.north.min(bounds.north),
        }
    }

    /// Edge values in degrees, as (west, south, east, north).
    pub fn to_degrees(&self) -> (f64, f64, f64, f64) {
        (
            self.west.to_degrees(),
            self.south.to_degrees(),
            self.east.to_degrees(),
            self.north.to_degrees(),
        )
    }
}
