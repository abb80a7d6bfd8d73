//! Read-out for the location under the cursor
//!
//! Shows where the pointer is, which tile it is over at the current zoom,
//! and the zoom level the ground resolution there actually corresponds to.

use crate::core::geo::LatLng;
use crate::core::mercator::{effective_zoom_offset, tile_at};
use crate::tiles::quadkey::encode_quadkey;
use serde::Serialize;
use std::fmt;

/// Shown in place of the quadkey of the single zoom-0 tile.
pub const EMPTY_QUADKEY: &str = "\u{2205}";

/// Shown in place of tile fields beyond the projection's latitude range.
pub const NO_TILE: &str = "\u{2014}";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorInfo {
    pub lat_lng: LatLng,
    pub zoom: u8,
    pub effective_zoom_offset: i32,
    /// Tile column and row; `None` beyond the projection's latitude range.
    pub tile: Option<(i64, i64)>,
    pub quadkey: Option<String>,
}

impl CursorInfo {
    pub fn at(lat_lng: LatLng, zoom: u8) -> Self {
        let tile = tile_at(&lat_lng.normalized(), zoom).ok();
        Self {
            lat_lng,
            zoom,
            effective_zoom_offset: effective_zoom_offset(lat_lng.lat),
            tile: tile.map(|t| (t.x, t.y)),
            quadkey: tile.map(|t| encode_quadkey(t.x, t.y, t.z, None)),
        }
    }

    pub fn effective_zoom(&self) -> i32 {
        (self.zoom as i32).saturating_add(self.effective_zoom_offset)
    }

    /// Whether the effective zoom differs from the map zoom and is worth showing.
    pub fn shows_effective_zoom(&self) -> bool {
        self.effective_zoom_offset != 0
    }

    pub fn lat_text(&self) -> String {
        hemisphere(self.lat_lng.lat, 'N', 'S')
    }

    pub fn lng_text(&self) -> String {
        hemisphere(self.lat_lng.lng, 'E', 'W')
    }

    pub fn quadkey_text(&self) -> &str {
        match self.quadkey.as_deref() {
            Some("") => EMPTY_QUADKEY,
            Some(key) => key,
            None => NO_TILE,
        }
    }
}

fn hemisphere(degrees: f64, positive: char, negative: char) -> String {
    let dir = if degrees >= 0.0 { positive } else { negative };
    format!("{}{:.5}\u{b0}", dir, degrees.abs())
}

impl fmt::Display for CursorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} z{}", self.lat_text(), self.lng_text(), self.zoom)?;
        if self.shows_effective_zoom() {
            write!(f, " (eff. z{})", self.effective_zoom())?;
        }
        match self.tile {
            Some((x, y)) => write!(f, " tile {},{} qt {}", x, y, self.quadkey_text()),
            None => write!(f, " tile {} qt {}", NO_TILE, NO_TILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_format() {
        let info = CursorInfo::at(LatLng::new(30.0, -0.5), 2);
        assert_eq!(info.lat_text(), "N30.00000\u{b0}");
        assert_eq!(info.lng_text(), "W0.50000\u{b0}");
        assert_eq!(CursorInfo::at(LatLng::new(-1.25, 0.0), 0).lat_text(), "S1.25000\u{b0}");
    }

    #[test]
    fn test_tile_and_quadkey() {
        let info = CursorInfo::at(LatLng::new(40.7128, -74.0060), 10);
        assert_eq!(info.tile, Some((301, 385)));
        assert_eq!(info.quadkey.as_deref().map(str::len), Some(10));

        let world = CursorInfo::at(LatLng::new(0.0, 0.0), 0);
        assert_eq!(world.tile, Some((0, 0)));
        assert_eq!(world.quadkey_text(), EMPTY_QUADKEY);
    }

    #[test]
    fn test_effective_zoom() {
        let equator = CursorInfo::at(LatLng::new(0.0, 0.0), 5);
        assert!(!equator.shows_effective_zoom());
        assert_eq!(equator.effective_zoom(), 5);

        let north = CursorInfo::at(LatLng::new(60.0, 0.0), 5);
        assert!(north.shows_effective_zoom());
        assert_eq!(north.effective_zoom(), 6);
    }

    #[test]
    fn test_beyond_projection() {
        let info = CursorInfo::at(LatLng::new(88.0, 10.0), 3);
        assert_eq!(info.tile, None);
        assert_eq!(info.quadkey_text(), NO_TILE);
        assert!(info.to_string().ends_with("tile \u{2014} qt \u{2014}"));
    }

    #[test]
    fn test_unwrapped_longitude() {
        let wrapped = CursorInfo::at(LatLng::new(10.0, 190.0), 4);
        let canonical = CursorInfo::at(LatLng::new(10.0, -170.0), 4);
        assert_eq!(wrapped.tile, canonical.tile);
        assert_eq!(wrapped.lng_text(), "E190.00000\u{b0}");
    }
}
