//! Tile layers as the map widget sees them.

pub mod adapter;
pub mod catalog;

pub use adapter::{LayerStack, Ordered, PassThrough, TileFrame, TileLoadHook, WithBackdrop};
pub use catalog::{CatalogEntry, LayerCatalog, LayerDescriptor, LayerSpec, LayerUrl};
