//! Texture IO
//!
//! Texture container format identification, mip level buffer layout and
//! codec plugin dispatch, re-exported from the member crates as one API.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use texture_io::{FallbackKind, MipSet, PluginManager, TextureIo, TextureIoConfig};
//!
//! let config = TextureIoConfig::new().with_fallback(FallbackKind::ImageCrate);
//! let io = TextureIo::from_config(config, Arc::new(PluginManager::new()))?;
//!
//! let mut mip_set = MipSet::default();
//! io.load("albedo.png", &mut mip_set, false)?;
//! io.save("albedo.tga", &mut mip_set, false)?;
//!
//! # Ok::<(), texture_io::TextureIoError>(())
//! ```

// Re-export from core and formats crates
pub use texture_io_core::{
    BlockShape, ChannelFormat, DataType, FourCC, MipLevel, MipSet, PixelFormat, Result,
    TextureIoError, TextureType, constants::*,
};

pub use texture_io_formats::{
    AbortFlag, AbortSignal, BlockDimensionSolver, ChannelFormatResolver, DecodedImage,
    ExtensionClassifier, FallbackImageLoader, FallbackKind, FormatTable, ImageCrateFallback,
    ImagePlugin, MipAllocator, MipBufferShaper, NoFallback, PixelSource, PluginFailure, PluginKey,
    PluginManager, PluginRegistry, ProgressSink, SharedIo, TextureIo, TextureIoConfig,
};

pub use texture_io_formats::texture::helpers::{f16_bits_to_f32, f32_to_f16_bits};

/// Build a facade from a YAML configuration file
pub fn texture_io_from_yaml<P: AsRef<std::path::Path>>(
    config_path: P,
    registry: std::sync::Arc<dyn PluginRegistry>,
) -> Result<TextureIo> {
    let config = TextureIoConfig::from_yaml_file(config_path)?;
    TextureIo::from_config(config, registry)
}
