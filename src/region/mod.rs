//! The download region: an editable ring of vertices that may straddle
//! the antimeridian.

pub mod boundary;
pub mod events;
pub mod intent;
pub mod polygon;

pub use boundary::{format_boundary, parse_boundary, validate_boundary};
pub use events::{ChangeLog, RegionChange, RegionListener};
pub use intent::{IntentOutcome, RegionIntent};
pub use polygon::{RegionPolygon, RegionState, Vertex, VertexId, VertexRole};
