use crate::{
    core::{config::LayerConfig, geo::TileCoord},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    Error, Result,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    #[serde(rename = "url")]
    pub url_template: String,
    /// Available subdomains for load balancing, `"abc"` or `["a", "b", "c"]`
    #[serde(deserialize_with = "deserialize_subdomains")]
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: String,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            max_zoom: 18,
            min_zoom: 0,
        }
    }
}

fn deserialize_subdomains<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subdomains {
        Letters(String),
        List(Vec<String>),
    }

    Ok(match Subdomains::deserialize(deserializer)? {
        Subdomains::Letters(letters) => letters.chars().map(String::from).collect(),
        Subdomains::List(list) => list,
    })
}

/// A tile-based basemap. It resolves tile URLs; fetching them is up to the host.
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    /// Create a new tile layer with default OpenStreetMap tiles
    pub fn new(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::default())
    }

    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            options,
        }
    }

    /// Create a tile layer for OpenStreetMap
    pub fn openstreetmap(id: String, name: String) -> Self {
        Self::new(id, name)
    }

    /// Builds a tile layer from its config; `url` is required
    pub fn from_config(id: String, name: String, config: &LayerConfig) -> Result<Self> {
        if config.option_str("url").is_none() {
            return Err(Error::Layer(format!("Tile layer '{}' has no url", id)).into());
        }

        let options: TileLayerOptions =
            serde_json::from_value(Value::Object(config.options.clone()))
                .map_err(Error::Serialization)?;

        let mut layer = Self::with_options(id, name, options);
        layer.properties.index = config.option_as("index")?;
        Ok(layer)
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// URL of a tile, with the subdomain picked from the tile position
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = if self.options.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x + coord.y) % self.options.subdomains.len() as u32) as usize;
            self.options.subdomains[idx].as_str()
        };

        self.options
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", "")
    }

    /// Whether tiles are available at a map zoom level
    pub fn covers_zoom(&self, zoom: f64) -> bool {
        zoom >= f64::from(self.options.min_zoom) && zoom <= f64::from(self.options.max_zoom)
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.properties.layer_type.to_string(),
            "url": self.options.url_template,
            "attribution": self.options.attribution,
            "minZoom": self.options.min_zoom,
            "maxZoom": self.options.max_zoom,
        })
    }
}
