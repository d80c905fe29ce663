//! FourCC to pixel format table
//!
//! Decoding accepts every tag ever written for a format, including the
//! deprecated aliases older tools emitted. Encoding only ever produces the
//! canonical tag, or `DX10` when the format has no tag of its own.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use texture_io_core::{FourCC, MipSet, PixelFormat};

/// Deprecated tags and the canonical tag they stand for
static LEGACY_ALIASES: Lazy<HashMap<FourCC, FourCC>> = Lazy::new(|| {
    HashMap::from([
        (FourCC::DXT5_GXRB, FourCC::DXT5_XRBG),
        (FourCC::DXT5_GRXB, FourCC::DXT5_RXBG),
        (FourCC::DXT5_RXGB, FourCC::DXT5_XGBR),
        (FourCC::DXT5_BRGX, FourCC::DXT5_RGXB),
        (FourCC::BC4S, FourCC::ATI1N),
        (FourCC::BC4U, FourCC::ATI1N),
        (FourCC::BC5S, FourCC::ATI2N),
    ])
});

/// Bidirectional FourCC / [`PixelFormat`] mapping
pub struct FormatTable;

impl FormatTable {
    /// Map a container tag to its pixel format
    ///
    /// Total: unmapped tags give [`PixelFormat::Unknown`].
    pub fn tag_to_format(tag: FourCC) -> PixelFormat {
        let tag = Self::canonical_tag(tag);
        match tag {
            FourCC::ATI1N => PixelFormat::ATI1N,
            FourCC::ATI2N => PixelFormat::ATI2N,
            FourCC::ATI2N_XY => PixelFormat::ATI2N_XY,
            FourCC::ATI2N_DXT5 => PixelFormat::ATI2N_DXT5,
            FourCC::DXT1 => PixelFormat::DXT1,
            FourCC::DXT3 => PixelFormat::DXT3,
            FourCC::DXT5 => PixelFormat::DXT5,
            FourCC::DXT5_XGBR => PixelFormat::DXT5_xGBR,
            FourCC::DXT5_RXBG => PixelFormat::DXT5_RxBG,
            FourCC::DXT5_RBXG => PixelFormat::DXT5_RBxG,
            FourCC::DXT5_XRBG => PixelFormat::DXT5_xRBG,
            FourCC::DXT5_RGXB => PixelFormat::DXT5_RGxB,
            FourCC::DXT5_XGXR => PixelFormat::DXT5_xGxR,
            FourCC::ATC_RGB => PixelFormat::ATC_RGB,
            FourCC::ATC_RGBA_EXPLICIT => PixelFormat::ATC_RGBA_Explicit,
            FourCC::ATC_RGBA_INTERP => PixelFormat::ATC_RGBA_Interpolated,
            FourCC::ETC_RGB => PixelFormat::ETC_RGB,
            FourCC::ETC2_RGB => PixelFormat::ETC2_RGB,
            FourCC::BC6H => PixelFormat::BC6H,
            FourCC::BC7 => PixelFormat::BC7,
            FourCC::ASTC => PixelFormat::ASTC,
            FourCC::GT => PixelFormat::GT,
            _ => PixelFormat::Unknown,
        }
    }

    /// Write the canonical tags for `format` into the MipSet
    ///
    /// Returns the primary tag and the secondary tag, if the format has one.
    /// Formats without a secondary tag clear `fourcc2` so a stale value
    /// cannot shadow the new primary tag.
    pub fn format_to_tag(format: PixelFormat, mip_set: &mut MipSet) -> (FourCC, Option<FourCC>) {
        let (primary, secondary) = Self::encode(format);
        mip_set.fourcc = primary;
        mip_set.fourcc2 = secondary.unwrap_or(FourCC::NONE);
        (primary, secondary)
    }

    /// Canonical tags for `format` without touching a MipSet
    pub fn encode(format: PixelFormat) -> (FourCC, Option<FourCC>) {
        let primary = match format {
            PixelFormat::BC4 | PixelFormat::ATI1N => FourCC::ATI1N,
            PixelFormat::ATI2N => FourCC::ATI2N,
            PixelFormat::BC5 | PixelFormat::ATI2N_XY => {
                return (FourCC::ATI2N, Some(FourCC::ATI2N_XY));
            }
            PixelFormat::ATI2N_DXT5 => FourCC::ATI2N_DXT5,
            PixelFormat::BC1 | PixelFormat::DXT1 => FourCC::DXT1,
            PixelFormat::BC2 | PixelFormat::DXT3 => FourCC::DXT3,
            PixelFormat::BC3 | PixelFormat::DXT5 => FourCC::DXT5,
            PixelFormat::DXT5_xGBR => FourCC::DXT5_XGBR,
            PixelFormat::DXT5_RxBG => FourCC::DXT5_RXBG,
            PixelFormat::DXT5_RBxG => FourCC::DXT5_RBXG,
            PixelFormat::DXT5_xRBG => FourCC::DXT5_XRBG,
            PixelFormat::DXT5_RGxB => FourCC::DXT5_RGXB,
            PixelFormat::DXT5_xGxR => FourCC::DXT5_XGXR,
            PixelFormat::ATC_RGB => FourCC::ATC_RGB,
            PixelFormat::ATC_RGBA_Explicit => FourCC::ATC_RGBA_EXPLICIT,
            PixelFormat::ATC_RGBA_Interpolated => FourCC::ATC_RGBA_INTERP,
            PixelFormat::ETC_RGB => FourCC::ETC_RGB,
            PixelFormat::ETC2_RGB => FourCC::ETC2_RGB,
            PixelFormat::GT => FourCC::GT,
            // BC6H, BC7, ASTC and everything else go through the extended header
            _ => FourCC::DX10,
        };
        (primary, None)
    }

    /// Check if the tag is a deprecated alias accepted only for decoding
    pub fn is_legacy_alias(tag: FourCC) -> bool {
        LEGACY_ALIASES.contains_key(&tag)
    }

    /// Resolve a deprecated alias to its canonical tag; other tags pass through
    pub fn canonical_tag(tag: FourCC) -> FourCC {
        LEGACY_ALIASES.get(&tag).copied().unwrap_or(tag)
    }

    /// Tags written by [`FormatTable::encode`] that decode back to a format
    pub fn canonical_tags() -> Vec<FourCC> {
        vec![
            FourCC::ATI1N,
            FourCC::ATI2N,
            FourCC::ATI2N_XY,
            FourCC::ATI2N_DXT5,
            FourCC::DXT1,
            FourCC::DXT3,
            FourCC::DXT5,
            FourCC::DXT5_XGBR,
            FourCC::DXT5_RXBG,
            FourCC::DXT5_RBXG,
            FourCC::DXT5_XRBG,
            FourCC::DXT5_RGXB,
            FourCC::DXT5_XGXR,
            FourCC::ATC_RGB,
            FourCC::ATC_RGBA_EXPLICIT,
            FourCC::ATC_RGBA_INTERP,
            FourCC::ETC_RGB,
            FourCC::ETC2_RGB,
            FourCC::GT,
        ]
    }

    /// Every deprecated alias
    pub fn legacy_aliases() -> Vec<FourCC> {
        LEGACY_ALIASES.keys().copied().collect()
    }
}
