//! Configuration for tile resolution and region editing
//!
//! Settings are plain serde structs with sensible defaults, so a partial
//! JSON document only needs to name the fields it changes. Presets cover
//! the common deployments.

use crate::core::constants::{
    BACKDROP_CELL_SIZE, BACKDROP_COLORS, DEFAULT_BOUNDS_PRECISION, DEFAULT_ZOOM, MAX_JOB_ZOOM,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Decimal places in exported boundaries.
    pub bounds_precision: usize,
    /// Zoom used when a caller does not name one.
    pub default_zoom: u8,
    /// Server-side `{custom:key}` lookups; `None` disables them.
    pub custom: Option<CustomResolverConfig>,
    /// Pattern painted behind every tile; `None` leaves tiles untouched.
    pub backdrop: Option<Backdrop>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            bounds_precision: DEFAULT_BOUNDS_PRECISION,
            default_zoom: DEFAULT_ZOOM,
            custom: Some(CustomResolverConfig::default()),
            backdrop: Some(Backdrop::default()),
        }
    }
}

impl RegionConfig {
    /// No network access at all: custom lookups are disabled.
    pub fn offline() -> Self {
        Self {
            custom: None,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RegionConfig = serde_json::from_str(json).map_err(MapError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(MapError::from)?;
        log::debug!("loaded region config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_zoom > MAX_JOB_ZOOM {
            return Err(MapError::Config(format!(
                "default_zoom {} is deeper than {}",
                self.default_zoom, MAX_JOB_ZOOM
            ))
            .into());
        }
        if self.bounds_precision > 15 {
            return Err(MapError::Config(format!(
                "bounds_precision {} exceeds f64 precision",
                self.bounds_precision
            ))
            .into());
        }
        if let Some(custom) = &self.custom {
            if custom.base_url.trim().is_empty() {
                return Err(MapError::Config("custom.base_url is empty".into()).into());
            }
        }
        Ok(())
    }
}

/// Where and how `{custom:key}` tokens are looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomResolverConfig {
    /// Server root; lookups hit `<base_url>/tileurl/<key>/<z>/<x>,<y>`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
    /// Memoized lookups; 0 disables the cache.
    pub cache_size: usize,
}

impl Default for CustomResolverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: Some(10_000),
            user_agent: format!("tileregion/{}", env!("CARGO_PKG_VERSION")),
            cache_size: 1024,
        }
    }
}

/// Checkerboard drawn behind tiles so transparent areas stay visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backdrop {
    pub cell_size: u32,
    pub colors: [(u8, u8, u8); 2],
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            cell_size: BACKDROP_CELL_SIZE,
            colors: BACKDROP_COLORS,
        }
    }
}

impl Backdrop {
    /// Color of the backdrop at tile pixel `(px, py)`.
    pub fn color_at(&self, px: u32, py: u32) -> (u8, u8, u8) {
        let cell = self.cell_size.max(1);
        let parity = (px / cell + py / cell) % 2;
        self.colors[parity as usize]
    }
}
