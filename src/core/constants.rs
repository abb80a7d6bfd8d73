//! Core constants derived from Web-Mercator conventions and the download-job format.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude at which the square Web-Mercator world ends (`atan(sinh(π))`).
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Decimal places used when exporting region boundaries.
pub const DEFAULT_BOUNDS_PRECISION: usize = 5;

/// Deepest zoom a download job may request.
pub const MAX_JOB_ZOOM: u8 = 30;

/// Zoom the map opens at.
pub const DEFAULT_ZOOM: u8 = 2;

/// Default offset for longitude normalization, giving `[-180, 180)`.
pub const DEFAULT_ANGLE_OFFSET: f64 = 180.0;

/// Side of one checkerboard cell painted behind translucent tiles.
pub const BACKDROP_CELL_SIZE: u32 = 8;

/// Alternating checkerboard colors (RGB).
pub const BACKDROP_COLORS: [(u8, u8, u8); 2] = [(0x78, 0x78, 0x78), (0x88, 0x88, 0x88)];
