//! Spherical Web-Mercator (EPSG:3857) helpers in world-pixel space.
//!
//! At zoom `z` the world is a square of `TILE_SIZE * 2^z` pixels with the
//! origin at the northwest corner. Latitudes beyond [`MAX_LATITUDE`] fall
//! outside that square; projecting them is an error rather than a clamp so
//! that callers never compute a tile index for a point that has none.

use crate::core::constants::{MAX_LATITUDE, TILE_SIZE};
use crate::core::geo::{LatLng, Point, TileCoord};
use crate::MapError;
use std::f64::consts::PI;

const ZOOM_EPSILON: f64 = 1.0e-9;

/// Side of the world square in pixels at `zoom`.
pub fn world_pixels(zoom: u8) -> f64 {
    TILE_SIZE as f64 * 2_f64.powi(zoom as i32)
}

/// True if `lat` can be projected.
pub fn in_projection_range(lat: f64) -> bool {
    lat.abs() <= MAX_LATITUDE
}

/// Forward projection of `(lat, lng)` to world pixels at `zoom`.
pub fn project(lat: f64, lng: f64, zoom: u8) -> Result<Point, MapError> {
    if !in_projection_range(lat) {
        return Err(MapError::OutOfProjectionRange { lat });
    }

    let scale = world_pixels(zoom);
    let x = (lng + 180.0) / 360.0 * scale;
    let merc_y = (PI / 4.0 + lat * PI / 360.0).tan().ln();
    let y = (1.0 - merc_y / PI) / 2.0 * scale;

    Ok(Point::new(x, y))
}

/// Inverse of [`project`].
pub fn unproject(pixel: Point, zoom: u8) -> LatLng {
    let scale = world_pixels(zoom);
    let lng = pixel.x / scale * 360.0 - 180.0;
    let merc_y = PI * (1.0 - 2.0 * pixel.y / scale);
    let lat = (2.0 * merc_y.exp().atan() - PI / 2.0).to_degrees();
    LatLng::new(lat, lng)
}

/// Tile row/column holding a pixel ordinate.
pub fn tile_index(pixel: f64) -> i64 {
    (pixel / TILE_SIZE as f64).floor() as i64
}

/// Tile containing `lat_lng` at `zoom`.
pub fn tile_at(lat_lng: &LatLng, zoom: u8) -> Result<TileCoord, MapError> {
    let px = project(lat_lng.lat, lat_lng.lng, zoom)?;
    Ok(TileCoord::new(tile_index(px.x), tile_index(px.y), zoom))
}

/// How many zoom levels finer the ground resolution is at `lat` than at the
/// equator: `floor(log_0.5(cos(lat)))`.
///
/// At the poles the cosine vanishes and the offset grows without bound; it
/// saturates at `i32::MAX`.
pub fn effective_zoom_offset(lat: f64) -> i32 {
    let c = (lat * PI / 180.0).cos().abs();
    if c <= 0.0 {
        return i32::MAX;
    }
    // cos(60°) is not exactly 0.5 in floating point
    let offset = (c.ln() / 0.5_f64.ln() + ZOOM_EPSILON).floor();
    if offset >= i32::MAX as f64 {
        i32::MAX
    } else {
        offset as i32
    }
}

/// Display-only zoom corrected for Mercator distortion at `lat`.
pub fn effective_zoom(lat: f64, zoom: u8) -> i32 {
    (zoom as i32).saturating_add(effective_zoom_offset(lat))
}
