//! Layer descriptors and the tile sources derived from them
//!
//! Each configured layer appears twice in the layer switcher: once as the
//! locally cached copy served by the download backend, and once as a
//! `+<name>` reference layer pointing at the upstream tile server, so the
//! two can be compared while picking a region.

use crate::prelude::HashMap;
use crate::tiles::{
    custom::CustomResolver,
    source::TemplateTileSource,
    template::TileTemplate,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Prefix that marks the reference copy of a layer.
pub const REFERENCE_PREFIX: char = '+';

/// Where a layer's upstream tiles come from, as configured server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerUrl {
    /// A URL template, possibly containing `{type}`.
    Template(String),
    /// Computed per tile by the server; clients reach it through `{custom:<id>}`.
    ServerResolved,
}

/// Server-side definition of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Display name; defaults to the layer id.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overlay: bool,
    #[serde(default)]
    pub default: bool,
    pub tile_url: LayerUrl,
    /// Substituted for `{type}`, e.g. `png` or `jpg`.
    #[serde(default)]
    pub file_type: String,
}

/// A layer as advertised to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub overlay: bool,
    #[serde(default)]
    pub default: bool,
    /// Client-resolvable template: `{type}` is already expanded.
    pub url: TileTemplate,
}

impl LayerDescriptor {
    pub fn from_spec(id: &str, spec: &LayerSpec) -> Self {
        let url = match &spec.tile_url {
            LayerUrl::Template(template) => template.replace("{type}", &spec.file_type),
            LayerUrl::ServerResolved => format!("{{custom:{}}}", id),
        };
        Self {
            id: id.to_string(),
            name: spec.name.clone().unwrap_or_else(|| id.to_string()),
            overlay: spec.overlay,
            default: spec.default,
            url: TileTemplate::parse(&url),
        }
    }

    /// Name of the reference copy in the layer switcher.
    pub fn reference_name(&self) -> String {
        format!("{}{}", REFERENCE_PREFIX, self.name)
    }

    /// Template of the cached copy served by the backend.
    pub fn cache_template(&self, base: &str) -> TileTemplate {
        TileTemplate::parse(&format!("{}/tile/{}/{{z}}/{{x}},{{y}}", base, self.id))
    }

    /// Template of the reference copy: the backend proxy, or the upstream
    /// server directly. Going direct leaks the page's referer upstream.
    pub fn reference_template(&self, base: &str, proxy: bool) -> TileTemplate {
        if proxy {
            TileTemplate::parse(&format!("{}/tileproxy/{}/{{z}}/{{x}},{{y}}", base, self.id))
        } else {
            self.url.clone()
        }
    }
}

/// Named tile source for the layer switcher
pub struct CatalogEntry {
    pub name: String,
    pub overlay: bool,
    /// Shown when the map opens.
    pub enabled: bool,
    pub source: TemplateTileSource,
}

/// The set of layers a deployment offers, ordered by display name
#[derive(Debug, Clone, Default)]
pub struct LayerCatalog {
    /// All layers indexed by ID
    layers: HashMap<String, LayerDescriptor>,
    /// Layer IDs in display order
    order: Vec<String>,
}

impl LayerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from server-side layer specs keyed by id.
    pub fn from_specs<'a, I>(specs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a LayerSpec)>,
    {
        let mut catalog = Self::new();
        for (id, spec) in specs {
            catalog.insert(LayerDescriptor::from_spec(id, spec));
        }
        catalog
    }

    /// Build from the JSON list a layers endpoint returns.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let descriptors: Vec<LayerDescriptor> =
            serde_json::from_str(json).map_err(MapError::from)?;
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.insert(descriptor);
        }
        log::debug!("loaded {} layers", catalog.len());
        Ok(catalog)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let descriptors: Vec<&LayerDescriptor> = self.descriptors().collect();
        Ok(serde_json::to_string(&descriptors).map_err(MapError::from)?)
    }

    /// Add or replace a layer, keeping display order sorted by name
    pub fn insert(&mut self, descriptor: LayerDescriptor) {
        let id = descriptor.id.clone();
        self.order.retain(|existing| existing != &id);
        self.layers.insert(id.clone(), descriptor);

        let name = &self.layers[&id].name;
        let insert_pos = self
            .order
            .iter()
            .position(|other| {
                self.layers
                    .get(other)
                    .map(|l| l.name > *name)
                    .unwrap_or(false)
            })
            .unwrap_or(self.order.len());
        self.order.insert(insert_pos, id);
    }

    pub fn get(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Layers in display order
    pub fn descriptors(&self) -> impl Iterator<Item = &LayerDescriptor> + '_ {
        self.order.iter().filter_map(|id| self.layers.get(id))
    }

    /// Every switcher entry: each layer's cached copy followed by its
    /// `+<name>` reference copy. Reference copies resolve `{custom:..}`
    /// through `resolver`.
    pub fn entries(
        &self,
        base: &str,
        proxy: bool,
        resolver: Arc<dyn CustomResolver>,
    ) -> Vec<CatalogEntry> {
        let mut entries = Vec::with_capacity(self.len() * 2);
        for layer in self.descriptors() {
            entries.push(CatalogEntry {
                name: layer.name.clone(),
                overlay: layer.overlay,
                enabled: layer.default,
                source: TemplateTileSource::new(layer.cache_template(base)),
            });
            entries.push(CatalogEntry {
                name: layer.reference_name(),
                overlay: layer.overlay,
                enabled: false,
                source: TemplateTileSource::new(layer.reference_template(base, proxy))
                    .with_resolver(resolver.clone()),
            });
        }
        entries
    }
}
