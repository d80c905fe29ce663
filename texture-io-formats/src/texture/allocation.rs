//! Buffer allocation service shared with codec plugins
//!
//! Plugins never size buffers themselves: they are handed a [`SharedIo`]
//! before each call and allocate MipSet headers and level buffers through it.

use super::shaper::MipBufferShaper;
use texture_io_core::{
    ChannelFormat, DataType, MipLevel, MipSet, Result, TextureIoError, TextureType,
};
use tracing::debug;

/// Allocation service injected into codec plugins
pub trait SharedIo: Send + Sync {
    /// Reset `mip_set` to the given layout and build its level table
    #[allow(clippy::too_many_arguments)]
    fn allocate_mip_set(
        &self,
        mip_set: &mut MipSet,
        channel_format: ChannelFormat,
        data_type: DataType,
        texture_type: TextureType,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<()>;

    /// Allocate a zeroed uncompressed buffer for one level
    fn allocate_mip_level_data(
        &self,
        level: &mut MipLevel,
        width: u32,
        height: u32,
        channel_format: ChannelFormat,
        data_type: DataType,
    ) -> Result<()>;

    /// Allocate a zeroed buffer of `size` bytes for one compressed level
    fn allocate_compressed_mip_level_data(
        &self,
        level: &mut MipLevel,
        width: u32,
        height: u32,
        size: usize,
    ) -> Result<()>;
}

/// Number of levels in a full chain down to 1x1
pub fn max_mip_levels(width: u32, height: u32) -> usize {
    let largest = width.max(height).max(1);
    (u32::BITS - largest.leading_zeros()) as usize
}

/// Default [`SharedIo`] implementation backed by `Vec<u8>` buffers
#[derive(Debug, Clone, Copy, Default)]
pub struct MipAllocator;

impl MipAllocator {
    /// Create a new allocator
    pub fn new() -> Self {
        Self
    }
}

impl SharedIo for MipAllocator {
    fn allocate_mip_set(
        &self,
        mip_set: &mut MipSet,
        channel_format: ChannelFormat,
        data_type: DataType,
        texture_type: TextureType,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(TextureIoError::InvalidDimensions { width, height });
        }

        mip_set.channel_format = channel_format;
        mip_set.data_type = data_type;
        mip_set.texture_type = texture_type;
        mip_set.width = width;
        mip_set.height = height;
        mip_set.depth = depth.max(1);
        mip_set.compressed = channel_format == ChannelFormat::Compressed;
        mip_set.max_mip_levels = max_mip_levels(width, height);
        mip_set.mip_levels = mip_set.max_mip_levels;
        mip_set.reset_levels();

        debug!(
            "Allocated {:?} mip set {}x{}x{} with {} levels",
            texture_type,
            width,
            height,
            mip_set.depth,
            mip_set.max_mip_levels
        );
        Ok(())
    }

    fn allocate_mip_level_data(
        &self,
        level: &mut MipLevel,
        width: u32,
        height: u32,
        channel_format: ChannelFormat,
        data_type: DataType,
    ) -> Result<()> {
        if channel_format == ChannelFormat::Compressed {
            return Err(TextureIoError::unsupported(
                "compressed levels are sized by the codec",
            ));
        }

        let size = MipBufferShaper::checked_shape(width, height, channel_format, data_type)
            .ok_or(TextureIoError::InvalidDimensions { width, height })?;

        level.width = width;
        level.height = height;
        level.allocate(size);
        Ok(())
    }

    fn allocate_compressed_mip_level_data(
        &self,
        level: &mut MipLevel,
        width: u32,
        height: u32,
        size: usize,
    ) -> Result<()> {
        level.width = width;
        level.height = height;
        level.allocate(size);
        Ok(())
    }
}
