//! Data behind the map's side panels.

pub mod info;

pub use info::CursorInfo;
