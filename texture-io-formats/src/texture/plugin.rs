//! Codec plugin contracts
//!
//! Codecs are external collaborators looked up by `(domain, key)`. The
//! registry hands out a fresh plugin instance per request; the caller owns
//! it for the duration of one load or save.

use super::allocation::SharedIo;
use super::extension::PluginKey;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use texture_io_core::MipSet;

/// Non-zero status reported by a codec plugin
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("plugin returned status {code}")]
pub struct PluginFailure {
    pub code: i32,
}

impl PluginFailure {
    /// Create a plugin failure, mapping 0 to -1 so it never reads as success
    pub fn new(code: i32) -> Self {
        Self {
            code: if code == 0 { -1 } else { code },
        }
    }
}

/// Image codec plugin
pub trait ImagePlugin {
    /// Provide the allocation service used by the next load or save
    fn set_shared_io(&mut self, shared_io: Arc<dyn SharedIo>);

    /// Decode `path` into `mip_set`
    fn load_texture(&mut self, path: &Path, mip_set: &mut MipSet) -> Result<(), PluginFailure>;

    /// Encode `mip_set` to `path`
    fn save_texture(&mut self, path: &Path, mip_set: &MipSet) -> Result<(), PluginFailure>;
}

/// Plugin lookup by domain and key
pub trait PluginRegistry: Send + Sync {
    fn get_plugin(&self, domain: &str, key: &PluginKey) -> Option<Box<dyn ImagePlugin>>;
}

type PluginFactory = Box<dyn Fn() -> Box<dyn ImagePlugin> + Send + Sync>;

/// In-memory [`PluginRegistry`] built from plugin factories
#[derive(Default)]
pub struct PluginManager {
    factories: HashMap<(String, PluginKey), PluginFactory>,
}

impl PluginManager {
    /// Create an empty plugin manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `(domain, key)`, replacing any previous one
    pub fn register<F>(&mut self, domain: &str, key: PluginKey, factory: F)
    where
        F: Fn() -> Box<dyn ImagePlugin> + Send + Sync + 'static,
    {
        debug!("Registering plugin {}/{}", domain, key);
        self.factories
            .insert((domain.to_string(), key), Box::new(factory));
    }

    /// Builder-style [`PluginManager::register`]
    pub fn with_plugin<F>(mut self, domain: &str, key: PluginKey, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ImagePlugin> + Send + Sync + 'static,
    {
        self.register(domain, key, factory);
        self
    }

    /// Check if a factory is registered for `(domain, key)`
    pub fn contains(&self, domain: &str, key: &PluginKey) -> bool {
        self.factories
            .contains_key(&(domain.to_string(), key.clone()))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl PluginRegistry for PluginManager {
    fn get_plugin(&self, domain: &str, key: &PluginKey) -> Option<Box<dyn ImagePlugin>> {
        self.factories
            .get(&(domain.to_string(), key.clone()))
            .map(|factory| factory())
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("plugins", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
