use super::custom::{CustomResolver, NoCustomResolver};
use super::template::TileTemplate;
use crate::core::geo::TileCoord;
use std::sync::Arc;

/// Public OpenStreetMap tile server, sharded over three subdomains.
pub const OPENSTREETMAP_TEMPLATE: &str = "https://{s:abc}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`, or `None` when the tile has no
    /// usable address and should be skipped.
    fn url(&self, coord: TileCoord) -> Option<String>;
}

/// Tile source backed by a [`TileTemplate`].
pub struct TemplateTileSource {
    template: TileTemplate,
    resolver: Arc<dyn CustomResolver>,
}

impl TemplateTileSource {
    pub fn new(template: impl Into<TileTemplate>) -> Self {
        Self {
            template: template.into(),
            resolver: Arc::new(NoCustomResolver),
        }
    }

    pub fn openstreetmap() -> Self {
        Self::new(OPENSTREETMAP_TEMPLATE)
    }

    /// Route `{custom:..}` tokens through `resolver`.
    pub fn with_resolver(mut self, resolver: Arc<dyn CustomResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn template(&self) -> &TileTemplate {
        &self.template
    }
}

impl TileSource for TemplateTileSource {
    fn url(&self, coord: TileCoord) -> Option<String> {
        self.template.try_resolve(coord, self.resolver.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openstreetmap_sharding() {
        let source = TemplateTileSource::openstreetmap();
        assert_eq!(
            source.url(TileCoord::new(0, 0, 0)).as_deref(),
            Some("https://a.tile.openstreetmap.org/0/0/0.png")
        );
        assert_eq!(
            source.url(TileCoord::new(1, 0, 1)).as_deref(),
            Some("https://b.tile.openstreetmap.org/1/1/0.png")
        );
    }

    #[test]
    fn test_custom_source_skips_failed_tiles() {
        let resolver: Arc<dyn CustomResolver> = Arc::new(|_: &str, coord: TileCoord| {
            (coord.z < 2).then(|| format!("http://x/{}", coord))
        });
        let source = TemplateTileSource::new("{custom:layer}").with_resolver(resolver);
        assert_eq!(source.url(TileCoord::new(1, 1, 1)).as_deref(), Some("http://x/1/1,1"));
        assert_eq!(source.url(TileCoord::new(1, 1, 5)), None);
    }
}
