//! Google Maps basemap and the loader of the Maps JavaScript API

use crate::{
    core::{
        config::LayerConfig,
        constants::{GOOGLE_CLASS_NAME, GOOGLE_MAPS_API_URL, GOOGLE_MAPS_API_VERSION},
        map::Map,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    Error, Result,
};
use futures::{
    channel::oneshot,
    future::{FutureExt, Shared},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    future::Future,
    sync::{Arc, Mutex},
};

static GLOBAL_LOADER: Lazy<Arc<MapsApiLoader>> = Lazy::new(|| Arc::new(MapsApiLoader::new()));

/// Load state of the Maps API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
}

/// Adds a script to the page hosting the map
pub trait ScriptInjector: Send + Sync {
    fn inject(&self, src: &str);
}

struct LoaderInner {
    state: LoadState,
    injector: Option<Arc<dyn ScriptInjector>>,
    loaded_tx: Option<oneshot::Sender<()>>,
}

/// Loads the Maps API script at most once and signals when it is ready.
///
/// The host injects the script through a [`ScriptInjector`] and calls
/// [`mark_loaded`](Self::mark_loaded) once the API is usable.
pub struct MapsApiLoader {
    inner: Mutex<LoaderInner>,
    loaded: Shared<oneshot::Receiver<()>>,
}

impl MapsApiLoader {
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            inner: Mutex::new(LoaderInner {
                state: LoadState::NotLoaded,
                injector: None,
                loaded_tx: Some(tx),
            }),
            loaded: rx.shared(),
        }
    }

    pub fn with_injector(injector: Arc<dyn ScriptInjector>) -> Self {
        let loader = Self::new();
        loader.set_injector(injector);
        loader
    }

    /// Process-wide loader shared by layers that are not given one
    pub fn global() -> Arc<MapsApiLoader> {
        GLOBAL_LOADER.clone()
    }

    pub fn set_injector(&self, injector: Arc<dyn ScriptInjector>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.injector = Some(injector);
        }
    }

    pub fn state(&self) -> LoadState {
        self.inner
            .lock()
            .map(|inner| inner.state)
            .unwrap_or(LoadState::NotLoaded)
    }

    /// Script URL for an API key and version
    pub fn script_url(api_key: &str, version: &str) -> String {
        format!("{}?key={}&v={}", GOOGLE_MAPS_API_URL, api_key, version)
    }

    /// Injects the API script unless it is loaded or loading; returns
    /// whether this call injected it
    pub fn ensure_loading(&self, api_key: &str, version: &str) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        if inner.state != LoadState::NotLoaded {
            return false;
        }

        inner.state = LoadState::Loading;
        let url = Self::script_url(api_key, version);

        #[cfg(feature = "debug")]
        log::debug!("Loading Google Maps API from {}", url);

        match &inner.injector {
            Some(injector) => injector.inject(&url),
            None => {
                #[cfg(feature = "debug")]
                log::warn!("No script injector set, Google Maps API not injected");
            }
        }
        true
    }

    /// Signals that the API is ready; wakes every `wait_loaded` future
    pub fn mark_loaded(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.state = LoadState::Loaded;
            if let Some(tx) = inner.loaded_tx.take() {
                let _ = tx.send(());

                #[cfg(feature = "debug")]
                log::debug!("Google Maps API loaded");
            }
        }
    }

    /// Resolves once the API is loaded
    pub fn wait_loaded(&self) -> impl Future<Output = ()> + Send + 'static {
        self.loaded.clone().map(|_| ())
    }

    /// Like [`wait_loaded`](Self::wait_loaded), failing when the API is not
    /// ready within `timeout`
    #[cfg(feature = "tokio-runtime")]
    pub async fn wait_loaded_timeout(&self, timeout: std::time::Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.wait_loaded())
            .await
            .map_err(|_| Error::Layer("Timed out loading the Google Maps API".to_string()).into())
    }
}

impl Default for MapsApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Google basemap styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoogleStyle {
    #[default]
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl GoogleStyle {
    /// Map type id as the Maps API names it
    pub fn map_type(&self) -> &'static str {
        match self {
            GoogleStyle::Roadmap => "roadmap",
            GoogleStyle::Satellite => "satellite",
            GoogleStyle::Hybrid => "hybrid",
            GoogleStyle::Terrain => "terrain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleLayerOptions {
    pub style: GoogleStyle,
    pub version: String,
    pub api_key: String,
}

impl Default for GoogleLayerOptions {
    fn default() -> Self {
        Self {
            style: GoogleStyle::Roadmap,
            version: GOOGLE_MAPS_API_VERSION.to_string(),
            api_key: String::new(),
        }
    }
}

/// Google Maps basemap
pub struct GoogleLayer {
    properties: LayerProperties,
    options: GoogleLayerOptions,
    loader: Arc<MapsApiLoader>,
}

impl GoogleLayer {
    /// Creates the layer and starts loading the Maps API if needed
    pub fn new(
        id: String,
        name: String,
        options: GoogleLayerOptions,
        loader: Arc<MapsApiLoader>,
    ) -> Self {
        if loader.state() == LoadState::NotLoaded {
            loader.ensure_loading(&options.api_key, &options.version);
        }

        Self {
            properties: LayerProperties::new(id, name, LayerType::Google),
            options,
            loader,
        }
    }

    pub fn from_config(
        id: String,
        name: String,
        config: &LayerConfig,
        loader: Arc<MapsApiLoader>,
    ) -> Result<Self> {
        let options: GoogleLayerOptions =
            serde_json::from_value(serde_json::Value::Object(config.options.clone()))
                .map_err(Error::Serialization)?;
        Ok(Self::new(id, name, options, loader))
    }

    pub fn style(&self) -> GoogleStyle {
        self.options.style
    }

    pub fn loader(&self) -> &Arc<MapsApiLoader> {
        &self.loader
    }
}

impl LayerTrait for GoogleLayer {
    crate::impl_layer_trait!(GoogleLayer, properties);

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        map.container_mut().add_class(GOOGLE_CLASS_NAME);
        Ok(())
    }

    fn on_remove(&mut self, map: &mut Map) -> Result<()> {
        map.container_mut().remove_class(GOOGLE_CLASS_NAME);
        Ok(())
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.properties.layer_type.to_string(),
            "style": self.options.style,
            "mapType": self.options.style.map_type(),
            "version": self.options.version,
        })
    }
}
