//! FourCC container tags
//!
//! Four ASCII bytes packed little-endian into a `u32`, as stored in
//! container headers. A zero tag means "no tag".

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-bit container tag identifying a payload's pixel or block format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const NONE: Self = FourCC(0);

    // Block-compressed formats
    pub const DXT1: Self = FourCC::from_bytes(*b"DXT1");
    pub const DXT3: Self = FourCC::from_bytes(*b"DXT3");
    pub const DXT5: Self = FourCC::from_bytes(*b"DXT5");
    pub const ATI1N: Self = FourCC::from_bytes(*b"ATI1");
    pub const ATI2N: Self = FourCC::from_bytes(*b"ATI2");
    pub const ATI2N_XY: Self = FourCC::from_bytes(*b"A2XY");
    pub const ATI2N_DXT5: Self = FourCC::from_bytes(*b"A2D5");

    // DXT5 channel-swizzled variants
    pub const DXT5_XGBR: Self = FourCC::from_bytes(*b"xGBR");
    pub const DXT5_RXBG: Self = FourCC::from_bytes(*b"RxBG");
    pub const DXT5_RBXG: Self = FourCC::from_bytes(*b"RBxG");
    pub const DXT5_XRBG: Self = FourCC::from_bytes(*b"xRBG");
    pub const DXT5_RGXB: Self = FourCC::from_bytes(*b"RGxB");
    pub const DXT5_XGXR: Self = FourCC::from_bytes(*b"xGxR");

    // Deprecated tags, still accepted when decoding
    pub const DXT5_GXRB: Self = FourCC::from_bytes(*b"GXRB");
    pub const DXT5_GRXB: Self = FourCC::from_bytes(*b"GRXB");
    pub const DXT5_RXGB: Self = FourCC::from_bytes(*b"RXGB");
    pub const DXT5_BRGX: Self = FourCC::from_bytes(*b"BRGX");
    pub const BC4S: Self = FourCC::from_bytes(*b"BC4S");
    pub const BC4U: Self = FourCC::from_bytes(*b"BC4U");
    pub const BC5S: Self = FourCC::from_bytes(*b"BC5S");

    // Mobile and vendor formats
    pub const ATC_RGB: Self = FourCC::from_bytes(*b"ATC ");
    pub const ATC_RGBA_EXPLICIT: Self = FourCC::from_bytes(*b"ATCA");
    pub const ATC_RGBA_INTERP: Self = FourCC::from_bytes(*b"ATCI");
    pub const ETC_RGB: Self = FourCC::from_bytes(*b"ETC ");
    pub const ETC2_RGB: Self = FourCC::from_bytes(*b"ETC2");
    pub const GT: Self = FourCC::from_bytes(*b"GT  ");

    // Formats that only have a tag for decoding; encoders write DX10
    pub const BC6H: Self = FourCC::from_bytes(*b"BC6H");
    pub const BC7: Self = FourCC::from_bytes(*b"BC7x");
    pub const ASTC: Self = FourCC::from_bytes(*b"ASTC");

    /// Generic extended-container tag; the real format lives in extra metadata
    pub const DX10: Self = FourCC::from_bytes(*b"DX10");

    /// Pack four bytes, first byte in the lowest bits
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        FourCC(u32::from_le_bytes(bytes))
    }

    /// The four bytes in file order
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// True for the zero tag
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for FourCC {
    fn from(value: u32) -> Self {
        FourCC(value)
    }
}

impl From<FourCC> for u32 {
    fn from(value: FourCC) -> Self {
        value.0
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(value: [u8; 4]) -> Self {
        FourCC::from_bytes(value)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            // Printable tags render as text, e.g. 'DXT5'
            write!(f, "'{}'", String::from_utf8_lossy(&bytes))
        } else {
            write!(f, "0x{:08X}", self.0)
        }
    }
}
