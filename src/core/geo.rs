use crate::core::angle::normalize_lng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Represents a geographical coordinate with latitude and longitude.
///
/// Longitude is stored as given (it may sit outside `[-180, 180)` while a
/// region straddles the antimeridian) and normalized on comparison/export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates latitude only; longitude is unconstrained in storage.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }

    /// Same point with its longitude moved into `[-180, 180)`.
    pub fn normalized(&self) -> LatLng {
        LatLng::new(self.lat, normalize_lng(self.lng))
    }

    /// Same latitude, replaced longitude.
    pub fn with_lng(&self, lng: f64) -> LatLng {
        LatLng::new(self.lat, lng)
    }

    /// True if both points denote the same place once longitudes are normalized.
    pub fn same_place(&self, other: &LatLng) -> bool {
        self.lat == other.lat && normalize_lng(self.lng) == normalize_lng(other.lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<LatLng> for geo_types::Coord<f64> {
    fn from(ll: LatLng) -> Self {
        geo_types::coord! { x: ll.lng, y: ll.lat }
    }
}

/// Represents a point in world pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Address of a tile in the slippy map tile system.
///
/// `x` and `y` are signed and unbounded: callers may ask for off-world
/// tiles and the resolver substitutes whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: i64, y: i64, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at this zoom.
    pub fn world_size(&self) -> i64 {
        2_i64.saturating_pow(self.z as u32)
    }

    /// Row index counted from the bottom of the world (TMS ordering).
    /// Off-world rows wrap instead of overflowing.
    pub fn flipped_y(&self) -> i64 {
        self.world_size().wrapping_sub(1).wrapping_sub(self.y)
    }

    /// Northwest corner of the tile.
    pub fn nw_corner(&self) -> LatLng {
        let n = self.world_size() as f64;
        let lng = self.x as f64 / n * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// Gets the geographic bounds of the tile
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.nw_corner();
        let se = TileCoord::new(self.x + 1, self.y + 1, self.z).nw_corner();
        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Gets the parent tile at a lower zoom level
    pub fn parent(&self) -> Option<TileCoord> {
        if self.z == 0 {
            None
        } else {
            Some(TileCoord::new(
                self.x.div_euclid(2),
                self.y.div_euclid(2),
                self.z - 1,
            ))
        }
    }

    /// The four tiles covering this one at the next zoom level
    pub fn children(&self) -> [TileCoord; 4] {
        let (x, y, z) = (self.x * 2, self.y * 2, self.z + 1);
        [
            TileCoord::new(x, y, z),
            TileCoord::new(x + 1, y, z),
            TileCoord::new(x, y + 1, z),
            TileCoord::new(x + 1, y + 1, z),
        ]
    }

    /// Checks if the tile lies inside the world at its zoom level
    pub fn is_valid(&self) -> bool {
        let n = self.world_size();
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{},{}", self.z, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
        assert!(LatLng::new(0.0, 181.0).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_normalized_and_same_place() {
        let p = LatLng::new(10.0, 181.0);
        assert_eq!(p.normalized(), LatLng::new(10.0, -179.0));
        assert!(p.same_place(&LatLng::new(10.0, -179.0)));
        assert!(!p.same_place(&LatLng::new(10.0, 179.0)));
    }

    #[test]
    fn test_flipped_y() {
        assert_eq!(TileCoord::new(0, 1, 3).flipped_y(), 6);
        assert_eq!(TileCoord::new(0, 0, 0).flipped_y(), 0);
        assert_eq!(TileCoord::new(0, -1, 1).flipped_y(), 2);
    }

    #[test]
    fn test_flipped_y_extreme_rows() {
        assert_eq!(TileCoord::new(0, i64::MIN, 0).flipped_y(), i64::MIN);
        // world_size saturates at i64::MAX from zoom 63 on
        assert_eq!(TileCoord::new(0, -5, 63).flipped_y(), i64::MIN + 3);
        assert_eq!(TileCoord::new(0, -1, 255).flipped_y(), i64::MAX);
        assert_eq!(TileCoord::new(0, i64::MAX, 63).flipped_y(), -1);
    }

    #[test]
    fn test_tile_bounds() {
        let world = TileCoord::new(0, 0, 0).bounds();
        assert!((world.north_east.lat - crate::constants::MAX_LATITUDE).abs() < 1e-6);
        assert_eq!(world.south_west.lng, -180.0);
        assert_eq!(world.north_east.lng, 180.0);
        assert!(world.contains(&LatLng::new(0.0, 0.0)));
    }

    #[test]
    fn test_parent_children() {
        let tile = TileCoord::new(5, 9, 4);
        for child in tile.children() {
            assert_eq!(child.parent(), Some(tile));
        }
        assert_eq!(TileCoord::new(0, 0, 0).parent(), None);
        assert_eq!(TileCoord::new(-1, -1, 1).parent(), Some(TileCoord::new(-1, -1, 0)));
        assert!(!TileCoord::new(-1, 0, 1).is_valid());
        assert!(TileCoord::new(1, 1, 1).is_valid());
    }
}
