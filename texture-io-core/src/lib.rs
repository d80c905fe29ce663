//! Texture IO Core
//!
//! Core data model shared by the texture I/O crates: the [`MipSet`]
//! descriptor and its level buffers, the internal [`PixelFormat`] set,
//! container [`FourCC`] tags and the error type.

pub mod constants;
pub mod error;
pub mod fourcc;
pub mod mip_set;
pub mod pixel_format;

// Re-export main types
pub use constants::*;
pub use error::{Result, TextureIoError};
pub use fourcc::FourCC;
pub use mip_set::{BlockShape, ChannelFormat, DataType, MipLevel, MipSet, TextureType};
pub use pixel_format::PixelFormat;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        let set = MipSet::new(4, 4, ChannelFormat::Bit8, DataType::ARGB);
        assert!(set.has_valid_dimensions());
        assert_eq!(set.format, PixelFormat::Unknown);
        assert!(set.fourcc.is_none());
    }
}
