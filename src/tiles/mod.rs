//! Tile addressing: quadkeys, URL templates and the sources built on them.

pub mod custom;
pub mod quadkey;
pub mod source;
pub mod template;

pub use custom::{CachedResolver, CustomResolver, HttpCustomResolver, NoCustomResolver};
pub use quadkey::{decode_quadkey, encode_quadkey, QuadKey};
pub use source::{TemplateTileSource, TileSource};
pub use template::{resolve_tile_url, resolve_tile_url_with, TileTemplate};
