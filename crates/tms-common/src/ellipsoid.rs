//! Reference ellipsoid shape parameters.

use serde::{Deserialize, Serialize};

/// An ellipsoid of revolution described by its semi-axes, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    pub semimajor_axis: f64,
    pub semiminor_axis: f64,
}

impl Ellipsoid {
    /// The WGS84 reference ellipsoid.
    pub const WGS84: Ellipsoid = Ellipsoid {
        semimajor_axis: 6_378_137.0,
        semiminor_axis: 6_356_752.314_245,
    };

    pub fn new(semimajor_axis: f64, semiminor_axis: f64) -> Self {
        Self {
            semimajor_axis,
            semiminor_axis,
        }
    }

    /// Largest semi-axis, used as the sphere radius by spherical projections.
    pub fn maximum_radius(&self) -> f64 {
        self.semimajor_axis.max(self.semiminor_axis)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
