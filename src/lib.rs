//! # tileregion
//!
//! Core of an offline tile-download planner: resolve tile-server URL
//! templates for a `(zoom, x, y)` tile, and edit the polygon that bounds
//! the region to download, correctly across the ±180° meridian.
//!
//! The UI around it (map widget, panels, job submission) lives elsewhere;
//! it drives this crate through [`RegionIntent`]s and tile requests and
//! renders what comes back.

pub mod core;
pub mod input;
pub mod layers;
pub mod region;
pub mod tiles;
pub mod ui;
pub use crate::core::constants;

pub mod prelude;

// Re-export public API
pub use core::{
    angle::normalize,
    config::RegionConfig,
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    mercator::{effective_zoom, project, tile_index, unproject},
};

pub use tiles::{
    custom::CustomResolver,
    quadkey::{decode_quadkey, encode_quadkey, QuadKey},
    source::TileSource,
    template::{resolve_tile_url, TileTemplate},
};

pub use region::{
    events::{RegionChange, RegionListener},
    intent::RegionIntent,
    polygon::{RegionPolygon, Vertex, VertexId},
};

pub use input::{events::InputEvent, handler::InputHandler};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Latitude {lat} is outside the projection range")]
    OutOfProjectionRange { lat: f64 },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Region has been destroyed")]
    Destroyed,
}

/// Error type alias for convenience
pub type Error = MapError;

/// Install `env_logger` with `default_filter` unless `RUST_LOG` overrides
/// it. Repeated calls are harmless.
#[cfg(feature = "debug")]
pub fn init_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
