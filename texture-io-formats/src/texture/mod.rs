//! Texture format identification and load/save dispatch
//!
//! # Architecture
//!
//! The module is organized into several sub-modules:
//! - `formats` - FourCC to pixel format table
//! - `resolver` - pixel format from a MipSet's channel layout
//! - `extension` - plugin keys and container facts from file names
//! - `block_dims` - ASTC block footprint selection
//! - `shaper` - mip level sizes and pixel conversion
//! - `allocation` - buffer allocation service handed to plugins
//! - `plugin` - codec plugin contracts and the in-memory registry
//! - `fallback` - generic image loaders used when no plugin matches
//! - `helpers` - half floats, swizzling, tone mapping
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use texture_io_formats::texture::{PluginManager, TextureIo};
//! use texture_io_formats::config::{FallbackKind, TextureIoConfig};
//! use texture_io_core::MipSet;
//!
//! let config = TextureIoConfig::new().with_fallback(FallbackKind::ImageCrate);
//! let io = TextureIo::from_config(config, Arc::new(PluginManager::new())).unwrap();
//!
//! let mut mip_set = MipSet::default();
//! io.load("input.png", &mut mip_set, false).unwrap();
//! io.save("output.bmp", &mut mip_set, false).unwrap();
//! ```

pub mod allocation;
pub mod block_dims;
pub mod extension;
pub mod fallback;
pub mod formats;
pub mod helpers;
pub mod plugin;
pub mod resolver;
pub mod shaper;

// Re-export main types for easy access
pub use allocation::{MipAllocator, SharedIo, max_mip_levels};
pub use block_dims::BlockDimensionSolver;
pub use extension::{ExtensionClassifier, PluginKey};
pub use fallback::{DecodedImage, DecodedPixels, FallbackImageLoader, ImageCrateFallback, NoFallback};
pub use formats::FormatTable;
pub use plugin::{ImagePlugin, PluginFailure, PluginManager, PluginRegistry};
pub use resolver::ChannelFormatResolver;
pub use shaper::{MipBufferShaper, PixelSource};

use crate::config::{FallbackKind, TextureIoConfig};
use crate::progress::{AbortFlag, AbortSignal, ProgressSink};
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;
use texture_io_core::{MipSet, PixelFormat, Result, TGA_PLUGIN_KEY, TextureIoError};
use tracing::{debug, info, warn};

/// Swizzle the TGA writer must see for data decompressed from `format`
///
/// The TGA writer expects B,G,R order only for data that came out of these
/// decoders. Remove once the writer handles channel order itself.
pub fn tga_save_swizzle(decompressed_from: PixelFormat) -> bool {
    matches!(
        decompressed_from,
        PixelFormat::ASTC
            | PixelFormat::BC7
            | PixelFormat::BC6H
            | PixelFormat::BC6H_SF
            | PixelFormat::ETC_RGB
            | PixelFormat::ETC2_RGB
    )
}

/// Restores a MipSet's swizzle flag when dropped
struct SwizzleGuard<'a> {
    mip_set: &'a mut MipSet,
    saved: bool,
}

impl<'a> SwizzleGuard<'a> {
    fn new(mip_set: &'a mut MipSet) -> Self {
        let saved = mip_set.swizzle;
        Self { mip_set, saved }
    }
}

impl Deref for SwizzleGuard<'_> {
    type Target = MipSet;

    fn deref(&self) -> &MipSet {
        &*self.mip_set
    }
}

impl DerefMut for SwizzleGuard<'_> {
    fn deref_mut(&mut self) -> &mut MipSet {
        &mut *self.mip_set
    }
}

impl Drop for SwizzleGuard<'_> {
    fn drop(&mut self) {
        self.mip_set.swizzle = self.saved;
    }
}

/// Main texture load/save facade
///
/// Picks a codec plugin by key and delegates to it, or hands the file to the
/// fallback loader when no plugin is registered. All collaborators are
/// injected; the facade holds no global state.
pub struct TextureIo {
    config: TextureIoConfig,
    registry: Arc<dyn PluginRegistry>,
    fallback: Box<dyn FallbackImageLoader>,
    shared_io: Arc<dyn SharedIo>,
    abort: Arc<dyn AbortSignal>,
}

impl TextureIo {
    /// Create a facade with default configuration and no fallback loader
    pub fn new(registry: Arc<dyn PluginRegistry>) -> Self {
        Self {
            config: TextureIoConfig::default(),
            registry,
            fallback: Box::new(NoFallback),
            shared_io: Arc::new(MipAllocator::new()),
            abort: Arc::new(AbortFlag::new()),
        }
    }

    /// Create a facade from a configuration
    pub fn from_config(config: TextureIoConfig, registry: Arc<dyn PluginRegistry>) -> Result<Self> {
        config.validate()?;
        let fallback: Box<dyn FallbackImageLoader> = match config.fallback {
            FallbackKind::Unavailable => Box::new(NoFallback),
            FallbackKind::ImageCrate => Box::new(ImageCrateFallback::new(config.exr_as_half)),
        };

        Ok(Self {
            config,
            fallback,
            ..Self::new(registry)
        })
    }

    /// Replace the fallback strategy
    pub fn with_fallback(mut self, fallback: Box<dyn FallbackImageLoader>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replace the allocation service handed to plugins
    pub fn with_shared_io(mut self, shared_io: Arc<dyn SharedIo>) -> Self {
        self.shared_io = shared_io;
        self
    }

    /// Replace the abort signal reported through [`TextureIo::progress_sink`]
    pub fn with_abort_signal(mut self, abort: Arc<dyn AbortSignal>) -> Self {
        self.abort = abort;
        self
    }

    pub fn config(&self) -> &TextureIoConfig {
        &self.config
    }

    /// Progress callback for codecs, answering with this facade's abort state
    pub fn progress_sink(&self) -> ProgressSink {
        ProgressSink::new(self.abort.clone())
    }

    /// Plugin key for `path`, or the alternate key when requested
    ///
    /// Returns `None` when the file name yields no valid key.
    pub fn plugin_key_for(&self, path: &Path, use_alternate_loader: bool) -> Option<PluginKey> {
        if use_alternate_loader {
            return PluginKey::new(&self.config.alternate_plugin_key);
        }

        let key = path.to_str().and_then(PluginKey::from_filename);
        if key.is_none() {
            warn!("No usable plugin key in {}", path.display());
        }
        key
    }

    fn find_plugin(&self, key: Option<&PluginKey>) -> Option<Box<dyn ImagePlugin>> {
        let key = key?;
        let plugin = self.registry.get_plugin(&self.config.plugin_domain, key);
        match plugin {
            Some(_) => debug!("Found plugin {}/{}", self.config.plugin_domain, key),
            None => debug!("No plugin for {}/{}", self.config.plugin_domain, key),
        }
        plugin
    }

    fn not_found(&self, key: Option<&PluginKey>) -> TextureIoError {
        TextureIoError::plugin_not_found(self.config.plugin_domain.clone(), key_name(key))
    }

    /// Load a texture file into `mip_set`
    ///
    /// A plugin failure is returned as is, without trying the fallback. On
    /// error `mip_set` may be partially populated and should be discarded.
    pub fn load<P: AsRef<Path>>(
        &self,
        path: P,
        mip_set: &mut MipSet,
        use_alternate_loader: bool,
    ) -> Result<()> {
        let path = path.as_ref();
        let key = self.plugin_key_for(path, use_alternate_loader);

        if let Some(mut plugin) = self.find_plugin(key.as_ref()) {
            plugin.set_shared_io(self.shared_io.clone());
            return plugin.load_texture(path, mip_set).map_err(|failure| {
                warn!("Plugin failed to load {}: {}", path.display(), failure);
                TextureIoError::plugin_failed(key_name(key.as_ref()), failure.code)
            });
        }

        if !self.fallback.is_available() {
            return Err(self.not_found(key.as_ref()));
        }

        info!("Loading {} through fallback loader", path.display());
        let decoded = self.fallback.load(path)?;
        decoded.populate(mip_set, self.shared_io.as_ref())
    }

    /// Save `mip_set` to a texture file
    ///
    /// Saving through a plugin to a `.tga` path temporarily overrides the
    /// swizzle flag (see [`tga_save_swizzle`]); the original value is
    /// restored however the call ends.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        mip_set: &mut MipSet,
        use_alternate_loader: bool,
    ) -> Result<()> {
        let path = path.as_ref();
        let key = self.plugin_key_for(path, use_alternate_loader);

        if let Some(mut plugin) = self.find_plugin(key.as_ref()) {
            plugin.set_shared_io(self.shared_io.clone());

            let mut guard = SwizzleGuard::new(mip_set);
            let is_tga = path
                .to_str()
                .is_some_and(|p| ExtensionClassifier::plugin_key(p) == TGA_PLUGIN_KEY);
            if is_tga {
                guard.swizzle = tga_save_swizzle(guard.decompressed_from);
                debug!(
                    "TGA save: swizzle {} -> {} (decompressed from {})",
                    guard.saved, guard.swizzle, guard.decompressed_from
                );
            }

            return plugin.save_texture(path, &guard).map_err(|failure| {
                warn!("Plugin failed to save {}: {}", path.display(), failure);
                TextureIoError::plugin_failed(key_name(key.as_ref()), failure.code)
            });
        }

        if !self.fallback.is_available() {
            return Err(self.not_found(key.as_ref()));
        }

        info!("Saving {} through fallback loader", path.display());
        self.fallback.save(path, mip_set)
    }
}

fn key_name(key: Option<&PluginKey>) -> String {
    key.map(|k| k.to_string()).unwrap_or_default()
}

impl std::fmt::Debug for TextureIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureIo")
            .field("config", &self.config)
            .field("fallback_available", &self.fallback.is_available())
            .finish()
    }
}
