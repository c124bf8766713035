//! TMS source inspection tool.
//!
//! Connects to a TMS tile pyramid, resolves its configuration (capabilities
//! document plus command-line overrides), and prints the result. Useful for
//! checking what a client would see before pointing a renderer at a source.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tms_client::{HttpFetcher, TmsImageryProvider, TmsOptions};

#[derive(Parser, Debug)]
#[command(name = "tms-probe")]
#[command(about = "Inspect the resolved configuration of a TMS tile source")]
struct Args {
    /// Base URL of the tile pyramid
    #[arg(long)]
    url: String,

    /// Print the URL of one tile, as "level,column,row"
    #[arg(long)]
    tile: Option<String>,

    /// Override the tile file extension
    #[arg(long)]
    file_extension: Option<String>,

    /// Override the minimum zoom level
    #[arg(long)]
    min_level: Option<u32>,

    /// Override the maximum zoom level
    #[arg(long)]
    max_level: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut options = TmsOptions::new(&args.url);
    options.file_extension = args.file_extension.clone();
    options.minimum_level = args.min_level;
    options.maximum_level = args.max_level;

    let fetcher = HttpFetcher::new().context("Failed to build HTTP fetcher")?;
    let provider = TmsImageryProvider::connect(options, &fetcher)
        .await
        .context("Failed to resolve the tile source configuration")?;

    info!(url = %args.url, "source resolved");

    let config = provider.config();
    let (west, south, east, north) = config.rectangle.to_degrees();
    let summary = json!({
        "base_url": config.base_url,
        "file_extension": config.file_extension,
        "tile_width": config.tile_width,
        "tile_height": config.tile_height,
        "minimum_level": config.minimum_level,
        "maximum_level": config.maximum_level,
        "rectangle_degrees": {
            "west": west,
            "south": south,
            "east": east,
            "north": north,
        },
        "flip_xy": config.flip_xy,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(triple) = args.tile.as_deref() {
        let (level, x, y) = parse_tile(triple)?;
        println!("{}", provider.tile_url(x, y, level)?);
    }

    Ok(())
}

/// Parse a "level,column,row" triple.
fn parse_tile(triple: &str) -> Result<(u32, u32, u32)> {
    let parts: Vec<&str> = triple.split(',').collect();
    if parts.len() != 3 {
        anyhow::bail!("Expected 'level,column,row', got '{}'", triple);
    }

    Ok((
        parts[0].parse().context("Invalid level")?,
        parts[1].parse().context("Invalid column")?,
        parts[2].parse().context("Invalid row")?,
    ))
}
