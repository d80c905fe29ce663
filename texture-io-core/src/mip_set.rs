//! MipSet data structures
//!
//! A [`MipSet`] describes one texture: its dimensions, channel layout, format
//! tags and a flat table of [`MipLevel`] buffers addressed by
//! `(level, face_or_slice)`.

use crate::constants::ASTC_BLOCK_DIMS;
use crate::fourcc::FourCC;
use crate::pixel_format::PixelFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage class of one channel value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChannelFormat {
    #[default]
    Bit8,
    Bit16,
    Float16,
    Float32,
    Bit2101010,
    Float9995E,
    Compressed,
    Bit32,
}

/// Which channels a texel carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataType {
    R,
    RG,
    XRGB,
    #[default]
    ARGB,
}

impl DataType {
    /// Number of stored channels
    pub fn channel_count(&self) -> usize {
        match self {
            DataType::R => 1,
            DataType::RG => 2,
            DataType::XRGB | DataType::ARGB => 4,
        }
    }
}

/// Texture topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextureType {
    #[default]
    TwoD,
    CubeMap,
    Volume,
    Array,
}

/// 2D ASTC block footprint
///
/// Both edges are drawn from {4,5,6,8,10,12}. `x` is the wider edge for
/// shapes produced by the block solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockShape {
    x: u8,
    y: u8,
}

impl BlockShape {
    /// Create a block shape, rejecting edges outside the candidate set
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if ASTC_BLOCK_DIMS.contains(&x) && ASTC_BLOCK_DIMS.contains(&y) {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Texels covered by one block
    pub fn texels(&self) -> u32 {
        self.x as u32 * self.y as u32
    }

    /// Bits per texel for a 128-bit block of this footprint
    pub fn bits_per_texel(&self) -> f32 {
        128.0 / self.texels() as f32
    }
}

impl Default for BlockShape {
    fn default() -> Self {
        Self { x: 4, y: 4 }
    }
}

impl fmt::Display for BlockShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// One mip level of one face or slice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl MipLevel {
    /// Create an empty level with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: Vec::new(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Replace the level's buffer
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Allocate a zeroed buffer of `size` bytes
    pub fn allocate(&mut self, size: usize) {
        self.data = vec![0; size];
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Texture descriptor and owner of all its level buffers
#[derive(Debug, Clone, Default)]
pub struct MipSet {
    pub texture_type: TextureType,
    pub width: u32,
    pub height: u32,
    /// Face count for cube maps, slice count for volumes and arrays
    pub depth: u32,
    pub mip_levels: usize,
    pub max_mip_levels: usize,
    pub channel_format: ChannelFormat,
    pub data_type: DataType,
    pub format: PixelFormat,
    /// Format the payload was decompressed from, if any
    pub decompressed_from: PixelFormat,
    pub compressed: bool,
    pub fourcc: FourCC,
    /// Secondary tag; takes priority over `fourcc` when non-zero
    pub fourcc2: FourCC,
    /// Colour channels are stored B,G,R instead of R,G,B
    pub swizzle: bool,
    pub block_shape: BlockShape,
    levels: Vec<MipLevel>,
}

impl MipSet {
    /// Create a 2D MipSet with basic parameters and no level table
    pub fn new(width: u32, height: u32, channel_format: ChannelFormat, data_type: DataType) -> Self {
        Self {
            width,
            height,
            depth: 1,
            channel_format,
            data_type,
            ..Default::default()
        }
    }

    /// Check if mip set has valid dimensions
    pub fn has_valid_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of faces or slices present at `level`
    ///
    /// 2D, cube map and array textures keep `depth` on every level. Volume
    /// slices halve per level, never dropping below one. Returns 0 for a
    /// zero depth or a level past `mip_levels`.
    pub fn max_faces_or_slices(&self, level: usize) -> usize {
        if self.depth < 1 || level >= self.mip_levels {
            return 0;
        }

        match self.texture_type {
            TextureType::TwoD | TextureType::CubeMap | TextureType::Array => self.depth as usize,
            TextureType::Volume => {
                let mut slices = self.depth as usize;
                for _ in 0..level {
                    slices = if slices > 1 { slices >> 1 } else { 1 };
                }
                slices
            }
        }
    }

    /// Position of `(level, face_or_slice)` in the level table
    pub fn level_index(&self, level: usize, face_or_slice: usize) -> Option<usize> {
        if face_or_slice >= self.max_faces_or_slices(level) {
            return None;
        }

        let preceding = match self.texture_type {
            TextureType::Volume => (0..level).map(|l| self.max_faces_or_slices(l)).sum(),
            _ => level * self.depth as usize,
        };
        Some(preceding + face_or_slice)
    }

    /// Total `(level, face_or_slice)` entries described by the header fields
    pub fn level_entry_count(&self) -> usize {
        (0..self.mip_levels)
            .map(|l| self.max_faces_or_slices(l))
            .sum()
    }

    /// Rebuild the level table from the header fields
    ///
    /// Every entry starts empty with its halved dimensions (minimum 1).
    /// Existing buffers are dropped.
    pub fn reset_levels(&mut self) {
        let mut levels = Vec::with_capacity(self.level_entry_count());
        let (mut w, mut h) = (self.width.max(1), self.height.max(1));
        for level in 0..self.mip_levels {
            for _ in 0..self.max_faces_or_slices(level) {
                levels.push(MipLevel::new(w, h));
            }
            w = (w / 2).max(1);
            h = (h / 2).max(1);
        }
        self.levels = levels;
    }

    /// Look up one level entry
    pub fn mip_level(&self, level: usize, face_or_slice: usize) -> Option<&MipLevel> {
        self.level_index(level, face_or_slice)
            .and_then(|i| self.levels.get(i))
    }

    /// Look up one level entry for writing
    pub fn mip_level_mut(&mut self, level: usize, face_or_slice: usize) -> Option<&mut MipLevel> {
        let index = self.level_index(level, face_or_slice)?;
        self.levels.get_mut(index)
    }

    /// All level entries in table order
    pub fn levels(&self) -> &[MipLevel] {
        &self.levels
    }

    /// Drop every level buffer and clear the level count
    pub fn release_levels(&mut self) {
        self.levels.clear();
        self.mip_levels = 0;
    }
}
