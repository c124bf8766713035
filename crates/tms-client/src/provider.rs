//! The TMS imagery provider: readiness gate over the resolved configuration.

use std::sync::Arc;

use tracing::{debug, warn};

use tms_common::{Rectangle, TilingScheme};
use tms_protocol::Capabilities;

use crate::fetch::CapabilitiesFetcher;
use crate::path::{join_url, tile_path, CAPABILITIES_FILE};
use crate::resolver;
use crate::{ResolvedConfig, TmsError, TmsOptions};

/// A ready TMS imagery source.
///
/// Construction performs the one-time capabilities fetch and metadata
/// resolution; a constructed provider is immutable and cheap to clone, so
/// concurrent tile requests need no synchronization.
#[derive(Debug, Clone)]
pub struct TmsImageryProvider {
    config: Arc<ResolvedConfig>,
}

impl TmsImageryProvider {
    /// Connect to a tile pyramid: fetch `tilemapresource.xml` once, resolve
    /// the configuration, and return the ready provider.
    ///
    /// A fetch or parse failure is not fatal: it is logged and resolution
    /// proceeds with the fallback defaults. Only a fatal configuration
    /// error (unsupported profile, unusable tileformat/tilesets) aborts
    /// construction, in which case the provider never becomes ready.
    pub async fn connect<F>(options: TmsOptions, fetcher: &F) -> Result<Self, TmsError>
    where
        F: CapabilitiesFetcher + ?Sized,
    {
        let url = join_url(&options.url, CAPABILITIES_FILE);

        let capabilities = match fetcher.fetch(&url).await {
            Ok(body) => match Capabilities::from_xml(&body) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    warn!(%url, error = %err, "capabilities document is unparseable, using defaults");
                    None
                }
            },
            Err(err) => {
                warn!(%url, error = %err, "capabilities document is unavailable, using defaults");
                None
            }
        };

        let config = resolver::resolve(&options.url, capabilities.as_ref(), &options)?;
        debug!(base_url = %config.base_url, "provider ready");

        Ok(Self::from_config(config))
    }

    /// Build a provider directly from an already-resolved configuration.
    pub fn from_config(config: ResolvedConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.config.tile_width
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.config.tile_height
    }

    /// Tile file extension.
    pub fn file_extension(&self) -> &str {
        &self.config.file_extension
    }

    /// Lowest addressable zoom level.
    pub fn minimum_level(&self) -> u32 {
        self.config.minimum_level
    }

    /// Highest addressable zoom level, if any ceiling is enforced.
    pub fn maximum_level(&self) -> Option<u32> {
        self.config.maximum_level
    }

    /// Geographic bounding rectangle, in radians.
    pub fn rectangle(&self) -> Rectangle {
        self.config.rectangle
    }

    /// The tiling scheme addressing the pyramid.
    pub fn tiling_scheme(&self) -> &Arc<dyn TilingScheme> {
        &self.config.tiling_scheme
    }

    /// The resource URL for a tile address.
    ///
    /// The address is validated against the resolved level range and the
    /// scheme's tile counts before the path is computed.
    pub fn tile_url(&self, x: u32, y: u32, level: u32) -> Result<String, TmsError> {
        let config = &self.config;

        let below_floor = level < config.minimum_level;
        let above_ceiling = config.maximum_level.is_some_and(|max| level > max);
        if below_floor || above_ceiling {
            return Err(TmsError::LevelOutOfRange {
                level,
                minimum: config.minimum_level,
                maximum: config.maximum_level,
            });
        }

        let columns = config.tiling_scheme.columns_at(level);
        let rows = config.tiling_scheme.rows_at(level);
        if x >= columns || y >= rows {
            return Err(TmsError::TileOutOfRange { x, y, level });
        }

        Ok(tile_path(config, x, y, level))
    }
}
