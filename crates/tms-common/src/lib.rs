//! Common geographic and tiling types shared across the TMS client crates.

pub mod ellipsoid;
pub mod rectangle;
pub mod scheme;
pub mod tile;

pub use ellipsoid::Ellipsoid;
pub use rectangle::{LonLat, Rectangle};
pub use scheme::{GeographicScheme, TilingScheme, WebMercatorScheme, MAX_MERCATOR_LAT};
pub use tile::TileCoord;
