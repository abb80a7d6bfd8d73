//! Prelude module for common tileregion types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tileregion::prelude::*;`

pub use crate::core::{
    angle::{normalize, normalize_lng, rectify_lng},
    config::{Backdrop, CustomResolverConfig, RegionConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    mercator::{effective_zoom, project, tile_at, unproject},
};

pub use crate::tiles::{
    custom::{CachedResolver, CustomResolver, HttpCustomResolver, NoCustomResolver},
    quadkey::{decode_quadkey, encode_quadkey, QuadKey},
    source::{TemplateTileSource, TileSource},
    template::{resolve_tile_url, TileTemplate},
};

pub use crate::region::{
    events::{ChangeLog, RegionChange, RegionListener},
    intent::{IntentOutcome, RegionIntent},
    polygon::{RegionPolygon, RegionState, Vertex, VertexId, VertexRole},
};

pub use crate::input::{
    events::{InputEvent, KeyCode, KeyModifiers},
    handler::{Action, InputHandler},
};

pub use crate::layers::{
    adapter::{TileFrame, TileLoadHook},
    catalog::{LayerCatalog, LayerDescriptor},
};

pub use crate::ui::info::CursorInfo;

pub use crate::{Error as MapError, Result};

pub use std::{collections::VecDeque, sync::Arc};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
