//! Internal pixel format definitions
//!
//! The closed set of formats a [`MipSet`](crate::MipSet) can carry, plus the
//! capability predicates used by loaders and codec selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal pixel formats
///
/// Uncompressed variants describe one texel layout each. Compressed variants
/// are identified through the container tag rather than the channel layout.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PixelFormat {
    // 8-bit channels
    ARGB_8888,
    RGBA_8888,
    BGRA_8888,
    RGB_888,
    RG_8,
    R_8,

    // Packed and 16-bit integer channels
    ARGB_2101010,
    ARGB_16,
    RG_16,
    R_16,

    // 32-bit integer channels
    ARGB_32,
    RG_32,
    R_32,

    // Floating point channels
    RGBE_32F,
    ARGB_16F,
    RG_16F,
    R_16F,
    ARGB_32F,
    RGB_32F,
    RG_32F,
    R_32F,

    // BC formats
    BC1,
    BC2,
    BC3,
    BC4,
    BC5,
    BC6H,
    BC6H_SF,
    BC7,

    // DXT formats and their channel-swizzled variants
    DXT1,
    DXT3,
    DXT5,
    DXT5_xGBR,
    DXT5_RxBG,
    DXT5_RBxG,
    DXT5_xRBG,
    DXT5_RGxB,
    DXT5_xGxR,

    // ATI formats
    ATI1N,
    ATI2N,
    ATI2N_XY,
    ATI2N_DXT5,

    // Mobile formats
    ATC_RGB,
    ATC_RGBA_Explicit,
    ATC_RGBA_Interpolated,
    ETC_RGB,
    ETC2_RGB,
    ASTC,

    GT,

    /// Sentinel for tags and layouts with no mapping
    #[default]
    Unknown,
}

impl PixelFormat {
    /// Check if format is block-compressed
    pub fn is_compressed_format(&self) -> bool {
        use PixelFormat::*;
        matches!(
            self,
            BC1 | BC2
                | BC3
                | BC4
                | BC5
                | BC6H
                | BC6H_SF
                | BC7
                | DXT1
                | DXT3
                | DXT5
                | DXT5_xGBR
                | DXT5_RxBG
                | DXT5_RBxG
                | DXT5_xRBG
                | DXT5_RGxB
                | DXT5_xGxR
                | ATI1N
                | ATI2N
                | ATI2N_XY
                | ATI2N_DXT5
                | ATC_RGB
                | ATC_RGBA_Explicit
                | ATC_RGBA_Interpolated
                | ETC_RGB
                | ETC2_RGB
                | ASTC
                | GT
        )
    }

    /// Check if format stores floating point channel values
    ///
    /// BC6H is included since it decodes to half floats.
    pub fn is_float_format(&self) -> bool {
        use PixelFormat::*;
        matches!(
            self,
            RGBE_32F
                | ARGB_16F
                | RG_16F
                | R_16F
                | ARGB_32F
                | RGB_32F
                | RG_32F
                | R_32F
                | BC6H
                | BC6H_SF
        )
    }

    /// Compression quality applies to every compressed format
    pub fn supports_quality_setting(&self) -> bool {
        self.is_compressed_format()
    }

    /// Check if format is one of the DXTC-family block formats
    pub fn supports_dxtc_base(&self) -> bool {
        use PixelFormat::*;
        matches!(
            self,
            ATI1N
                | ATI2N
                | ATI2N_XY
                | ATI2N_DXT5
                | BC1
                | BC2
                | BC3
                | BC4
                | BC5
                | BC6H
                | BC6H_SF
                | BC7
                | DXT1
                | DXT3
                | DXT5
                | DXT5_xGBR
                | DXT5_RxBG
                | DXT5_RBxG
                | DXT5_xRBG
                | DXT5_RGxB
                | DXT5_xGxR
        )
    }

    /// Bytes per compressed block, 0 for uncompressed formats
    ///
    /// Every format except ASTC uses 4x4 texel blocks; ASTC blocks are always
    /// 16 bytes with a per-texture footprint.
    pub fn block_bytes(&self) -> usize {
        use PixelFormat::*;
        match self {
            BC1 | BC4 | DXT1 | ATI1N | ATC_RGB | ETC_RGB | ETC2_RGB => 8,
            f if f.is_compressed_format() => 16,
            _ => 0,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_predicates() {
        assert!(PixelFormat::BC7.is_compressed_format());
        assert!(PixelFormat::GT.is_compressed_format());
        assert!(!PixelFormat::ARGB_8888.is_compressed_format());
        assert!(!PixelFormat::Unknown.is_compressed_format());

        assert!(PixelFormat::ASTC.supports_quality_setting());
        assert!(!PixelFormat::R_16F.supports_quality_setting());

        assert!(PixelFormat::DXT5_xGxR.supports_dxtc_base());
        assert!(PixelFormat::ATI2N_XY.supports_dxtc_base());
        assert!(!PixelFormat::ETC2_RGB.supports_dxtc_base());
        assert!(!PixelFormat::ASTC.supports_dxtc_base());
    }

    #[test]
    fn test_float_formats() {
        assert!(PixelFormat::ARGB_16F.is_float_format());
        assert!(PixelFormat::RGBE_32F.is_float_format());
        assert!(PixelFormat::BC6H_SF.is_float_format());
        assert!(!PixelFormat::ARGB_16.is_float_format());
    }

    #[test]
    fn test_block_bytes() {
        assert_eq!(PixelFormat::BC1.block_bytes(), 8);
        assert_eq!(PixelFormat::ETC2_RGB.block_bytes(), 8);
        assert_eq!(PixelFormat::BC3.block_bytes(), 16);
        assert_eq!(PixelFormat::ASTC.block_bytes(), 16);
        assert_eq!(PixelFormat::GT.block_bytes(), 16);
        assert_eq!(PixelFormat::ARGB_8888.block_bytes(), 0);
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(PixelFormat::default(), PixelFormat::Unknown);
        assert_eq!(PixelFormat::DXT5_RxBG.to_string(), "DXT5_RxBG");
    }
}
