//! Texture Format Identification and Dispatch
//!
//! This crate maps texture files to and from [`MipSet`](texture_io_core::MipSet)
//! descriptors:
//! - FourCC tag to pixel format mapping, including legacy aliases
//! - Pixel format resolution from channel layout
//! - Plugin keys from file extensions
//! - ASTC block footprint selection
//! - Mip level buffer sizing and filling
//! - Load/save dispatch to codec plugins with an optional fallback loader
//!
//! Block compression codecs are not part of this crate; they are reached
//! through the [`ImagePlugin`](texture::ImagePlugin) trait.
//!
//! # Example
//!
//! ```rust
//! use texture_io_formats::texture::{BlockDimensionSolver, FormatTable};
//! use texture_io_core::{FourCC, PixelFormat};
//!
//! assert_eq!(FormatTable::tag_to_format(FourCC::BC4U), PixelFormat::ATI1N);
//!
//! let shape = BlockDimensionSolver::closest_legal_block_shape(2.0, false);
//! assert_eq!((shape.x(), shape.y()), (8, 8));
//! ```

pub mod config;
pub mod progress;
pub mod texture;

// Re-export main types
pub use config::{FallbackKind, TextureIoConfig};
pub use progress::{AbortFlag, AbortSignal, ProgressSink};
pub use texture::{
    BlockDimensionSolver, ChannelFormatResolver, DecodedImage, ExtensionClassifier,
    FallbackImageLoader, FormatTable, ImageCrateFallback, ImagePlugin, MipAllocator,
    MipBufferShaper, NoFallback, PixelSource, PluginFailure, PluginKey, PluginManager,
    PluginRegistry, SharedIo, TextureIo,
};
