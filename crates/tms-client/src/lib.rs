//! TMS (Tile Map Service) imagery client.
//!
//! Resolves the configuration needed to address tiled raster imagery
//! published in the TMS directory layout, and maps tile addresses to
//! retrievable resource URLs.
//!
//! The entry point is [`TmsImageryProvider::connect`], which fetches the
//! source's `tilemapresource.xml` once, resolves a canonical
//! [`ResolvedConfig`] (falling back to sane defaults when the document is
//! unreachable), and returns an immutable, shareable provider.

pub mod config;
pub mod error;
pub mod fetch;
pub mod options;
pub mod path;
pub mod provider;
pub mod resolver;

pub use config::ResolvedConfig;
pub use error::{TmsError, TmsResult};
pub use fetch::{CapabilitiesFetcher, FetchError, HttpFetcher};
pub use options::TmsOptions;
pub use provider::TmsImageryProvider;
