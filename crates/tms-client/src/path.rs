//! Tile address to resource path computation.

use crate::ResolvedConfig;

/// File name of the capabilities document, joined onto the base URL.
pub const CAPABILITIES_FILE: &str = "tilemapresource.xml";

/// Join a segment onto a base URL without introducing a double slash.
pub fn join_url(base: &str, segment: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment)
}

/// Compute the resource path for a tile address.
///
/// TMS stores row 0 at the bottom of the pyramid, opposite of the top-down
/// row convention used for addressing, so the row is flipped against the
/// scheme's row count at the requested level:
/// `flipped = rows_at(level) - row - 1`.
///
/// The computation is pure and does not validate the address; `y` must be
/// below the scheme's row count at `level`.
pub fn tile_path(config: &ResolvedConfig, x: u32, y: u32, level: u32) -> String {
    let rows = config.tiling_scheme.rows_at(level);
    debug_assert!(y < rows, "row {} out of range at level {}", y, level);
    let flipped = rows - y - 1;

    format!(
        "{}/{}/{}/{}.{}",
        config.base_url.trim_end_matches('/'),
        level,
        x,
        flipped,
        config.file_extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tms_common::{TilingScheme, WebMercatorScheme};

    fn config(base_url: &str) -> ResolvedConfig {
        let scheme = Arc::new(WebMercatorScheme::default());
        ResolvedConfig {
            base_url: base_url.to_string(),
            file_extension: "png".to_string(),
            tile_width: 256,
            tile_height: 256,
            minimum_level: 0,
            maximum_level: Some(18),
            rectangle: scheme.rectangle(),
            tiling_scheme: scheme,
            flip_xy: false,
        }
    }

    #[test]
    fn test_join_url_without_trailing_slash() {
        assert_eq!(
            join_url("http://example.com/tiles", CAPABILITIES_FILE),
            "http://example.com/tiles/tilemapresource.xml"
        );
    }

    #[test]
    fn test_join_url_with_trailing_slash() {
        assert_eq!(
            join_url("http://example.com/tiles/", CAPABILITIES_FILE),
            "http://example.com/tiles/tilemapresource.xml"
        );
    }

    #[test]
    fn test_tile_path_flips_row() {
        let config = config("http://example.com/tiles");

        // 4 rows at level 2: row 0 maps to 3, row 3 maps to 0.
        assert_eq!(
            tile_path(&config, 1, 0, 2),
            "http://example.com/tiles/2/1/3.png"
        );
        assert_eq!(
            tile_path(&config, 1, 3, 2),
            "http://example.com/tiles/2/1/0.png"
        );
    }

    #[test]
    fn test_tile_path_flip_is_involutive() {
        let config = config("http://example.com/tiles");
        let rows = config.tiling_scheme.rows_at(5);

        for y in [0, 7, rows - 1] {
            let flipped = rows - y - 1;
            assert_eq!(rows - flipped - 1, y);
        }
    }

    #[test]
    fn test_tile_path_tolerates_trailing_slash() {
        let config = config("http://example.com/tiles/");
        assert_eq!(
            tile_path(&config, 0, 0, 0),
            "http://example.com/tiles/0/0/0.png"
        );
    }
}
