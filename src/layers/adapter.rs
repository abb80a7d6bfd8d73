//! Rendering adapter
//!
//! The map renderer calls a [`TileLoadHook`] for every tile it finishes
//! loading and asks it for a z-index when stacking layers. Extra behavior
//! is layered on by wrapping a hook in a decorator rather than touching
//! the renderer: [`WithBackdrop`] paints the checkerboard behind each tile,
//! [`Ordered`] overrides where a layer sits in the stack.

use crate::core::config::Backdrop;
use crate::core::geo::TileCoord;

/// A loaded tile as handed to hooks: square RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFrame {
    pub size: u32,
    pub rgba: Vec<u8>,
    /// Pattern to show through transparent pixels, if any.
    pub backdrop: Option<Backdrop>,
}

impl TileFrame {
    pub fn new(size: u32, rgba: Vec<u8>) -> Self {
        Self {
            size,
            rgba,
            backdrop: None,
        }
    }

    /// Fully transparent tile.
    pub fn transparent(size: u32) -> Self {
        Self::new(size, vec![0; (size * size * 4) as usize])
    }

    pub fn pixel(&self, px: u32, py: u32) -> Option<[u8; 4]> {
        if px >= self.size || py >= self.size {
            return None;
        }
        let i = ((py * self.size + px) * 4) as usize;
        self.rgba.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Blend the tile over its backdrop. Pixels become opaque; a tile
    /// without a backdrop is left as is.
    pub fn flatten(&mut self) {
        let Some(backdrop) = self.backdrop.take() else {
            return;
        };
        let size = self.size.max(1);
        for (i, px) in self.rgba.chunks_exact_mut(4).enumerate() {
            let (x, y) = (i as u32 % size, i as u32 / size);
            let (r, g, b) = backdrop.color_at(x, y);
            let alpha = px[3] as u32;
            for (channel, under) in px.iter_mut().zip([r, g, b]) {
                *channel = ((*channel as u32 * alpha + under as u32 * (255 - alpha)) / 255) as u8;
            }
            px[3] = 255;
        }
    }
}

/// Callbacks the renderer makes into a tile layer.
pub trait TileLoadHook {
    fn on_tile_load(&mut self, coord: TileCoord, tile: &mut TileFrame);

    fn z_index(&self) -> i32 {
        0
    }
}

/// Hook that does nothing; the base of a decorator chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl TileLoadHook for PassThrough {
    fn on_tile_load(&mut self, _coord: TileCoord, _tile: &mut TileFrame) {}
}

impl<F> TileLoadHook for F
where
    F: FnMut(TileCoord, &mut TileFrame),
{
    fn on_tile_load(&mut self, coord: TileCoord, tile: &mut TileFrame) {
        self(coord, tile)
    }
}

/// Sets the backdrop on every tile, then hands it to the wrapped hook.
#[derive(Debug, Clone)]
pub struct WithBackdrop<H> {
    inner: H,
    backdrop: Backdrop,
}

impl<H: TileLoadHook> WithBackdrop<H> {
    pub fn new(inner: H, backdrop: Backdrop) -> Self {
        Self { inner, backdrop }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: TileLoadHook> TileLoadHook for WithBackdrop<H> {
    fn on_tile_load(&mut self, coord: TileCoord, tile: &mut TileFrame) {
        tile.backdrop = Some(self.backdrop.clone());
        self.inner.on_tile_load(coord, tile);
    }

    fn z_index(&self) -> i32 {
        self.inner.z_index()
    }
}

/// Fixes the z-index of the wrapped hook.
#[derive(Debug, Clone)]
pub struct Ordered<H> {
    inner: H,
    z_index: i32,
}

impl<H: TileLoadHook> Ordered<H> {
    pub fn new(inner: H, z_index: i32) -> Self {
        Self { inner, z_index }
    }
}

impl<H: TileLoadHook> TileLoadHook for Ordered<H> {
    fn on_tile_load(&mut self, coord: TileCoord, tile: &mut TileFrame) {
        self.inner.on_tile_load(coord, tile);
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }
}

/// Hooks for the layers currently on the map, kept in z-index order.
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<(String, Box<dyn TileLoadHook>)>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer above every layer with a lower or equal z-index
    pub fn push(&mut self, name: impl Into<String>, hook: impl TileLoadHook + 'static) {
        let z_index = hook.z_index();
        let insert_pos = self
            .layers
            .iter()
            .position(|(_, h)| h.z_index() > z_index)
            .unwrap_or(self.layers.len());
        self.layers.insert(insert_pos, (name.into(), Box::new(hook)));
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|(n, _)| n != name);
        self.layers.len() != before
    }

    /// Layer names bottom to top.
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Deliver a loaded tile to the named layer's hook.
    pub fn tile_loaded(&mut self, name: &str, coord: TileCoord, tile: &mut TileFrame) -> bool {
        match self.layers.iter_mut().find(|(n, _)| n == name) {
            Some((_, hook)) => {
                hook.on_tile_load(coord, tile);
                true
            }
            None => {
                log::debug!("tile {} loaded for unknown layer {}", coord, name);
                false
            }
        }
    }
}
