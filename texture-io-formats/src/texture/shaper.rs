//! Mip level buffer layout
//!
//! Byte sizes for one mip level and conversion of RGBA pixel sources into a
//! level's channel format. Buffers are tightly packed: no row padding and no
//! alignment beyond a byte.

use super::helpers::half::{f16_bits_to_f32, f32_to_f16_bits};
use super::helpers::swizzler::TextureSwizzler;
use byteorder::{ByteOrder, LittleEndian};
use texture_io_core::{
    BlockShape, ChannelFormat, DataType, MipSet, PixelFormat, Result, TextureIoError,
};

/// Pixel data handed to [`MipBufferShaper::fill`], always R,G,B,A per texel
#[derive(Debug, Clone, Copy)]
pub enum PixelSource<'a> {
    Rgba8(&'a [u8]),
    RgbaF32(&'a [f32]),
}

impl PixelSource<'_> {
    /// Number of channel values
    pub fn len(&self) -> usize {
        match self {
            PixelSource::Rgba8(values) => values.len(),
            PixelSource::RgbaF32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Texel `index` as normalized floats
    fn texel_f32(&self, index: usize) -> [f32; 4] {
        let base = index * 4;
        match self {
            PixelSource::Rgba8(v) => [
                v[base] as f32 / 255.0,
                v[base + 1] as f32 / 255.0,
                v[base + 2] as f32 / 255.0,
                v[base + 3] as f32 / 255.0,
            ],
            PixelSource::RgbaF32(v) => [v[base], v[base + 1], v[base + 2], v[base + 3]],
        }
    }

    /// Texel `index` as 8-bit values
    fn texel_u8(&self, index: usize) -> [u8; 4] {
        let base = index * 4;
        match self {
            PixelSource::Rgba8(v) => [v[base], v[base + 1], v[base + 2], v[base + 3]],
            PixelSource::RgbaF32(_) => self.texel_f32(index).map(unorm8),
        }
    }
}

fn texel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn unorm16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// Computes and fills mip level buffers
pub struct MipBufferShaper;

impl MipBufferShaper {
    /// Bytes per texel for an uncompressed layout, 0 for compressed data
    pub fn bytes_per_pixel(channel_format: ChannelFormat, data_type: DataType) -> usize {
        let channels = data_type.channel_count();
        match channel_format {
            ChannelFormat::Bit8 => channels,
            ChannelFormat::Bit16 | ChannelFormat::Float16 => channels * 2,
            ChannelFormat::Float32 | ChannelFormat::Bit32 => channels * 4,
            ChannelFormat::Bit2101010 | ChannelFormat::Float9995E => 4,
            ChannelFormat::Compressed => 0,
        }
    }

    /// Byte length of an uncompressed level, saturating at `usize::MAX`
    pub fn shape(width: u32, height: u32, channel_format: ChannelFormat, data_type: DataType) -> usize {
        Self::checked_shape(width, height, channel_format, data_type).unwrap_or(usize::MAX)
    }

    /// Byte length of an uncompressed level, `None` if it overflows `usize`
    pub fn checked_shape(
        width: u32,
        height: u32,
        channel_format: ChannelFormat,
        data_type: DataType,
    ) -> Option<usize> {
        texel_count(width, height)?.checked_mul(Self::bytes_per_pixel(channel_format, data_type))
    }

    /// Byte length of a compressed level, rounding partial blocks up
    ///
    /// ASTC uses `block_shape`; every other format uses 4x4 blocks. Returns 0
    /// for uncompressed formats.
    pub fn compressed_size(format: PixelFormat, width: u32, height: u32, block_shape: BlockShape) -> usize {
        let (block_x, block_y) = match format {
            PixelFormat::ASTC => (block_shape.x() as u32, block_shape.y() as u32),
            _ => (4, 4),
        };
        let blocks = (width.div_ceil(block_x) as usize).saturating_mul(height.div_ceil(block_y) as usize);
        blocks.saturating_mul(format.block_bytes())
    }

    /// Convert `source` into the channel format of one level and store it
    ///
    /// With the MipSet's swizzle flag set, 4-channel data is written B,G,R,A
    /// and the flag is cleared afterwards. One and two channel layouts keep
    /// the leading R and G values.
    pub fn fill(
        mip_set: &mut MipSet,
        level: usize,
        face_or_slice: usize,
        source: PixelSource<'_>,
    ) -> Result<()> {
        let channel_format = mip_set.channel_format;
        let data_type = mip_set.data_type;
        let swizzle = mip_set.swizzle && data_type.channel_count() == 4;

        if !matches!(
            channel_format,
            ChannelFormat::Bit8 | ChannelFormat::Bit16 | ChannelFormat::Float16 | ChannelFormat::Float32
        ) {
            return Err(TextureIoError::unsupported(format!(
                "cannot fill {:?} level from RGBA source",
                channel_format
            )));
        }

        let mip_level = mip_set
            .mip_level_mut(level, face_or_slice)
            .ok_or(TextureIoError::LevelOutOfRange {
                level,
                face_or_slice,
            })?;

        let (width, height) = (mip_level.width, mip_level.height);
        let bpp = Self::bytes_per_pixel(channel_format, data_type);
        let (values, bytes) = texel_count(width, height)
            .and_then(|t| Some((t.checked_mul(4)?, t.checked_mul(bpp)?)))
            .ok_or(TextureIoError::InvalidDimensions { width, height })?;
        if source.len() != values {
            return Err(TextureIoError::size_mismatch(values, source.len()));
        }

        let channels = data_type.channel_count();
        let mut buffer = vec![0u8; bytes];

        for (index, out) in buffer.chunks_exact_mut(bpp).enumerate() {
            match channel_format {
                ChannelFormat::Bit8 => {
                    let rgba = TextureSwizzler::reorder(source.texel_u8(index), swizzle);
                    out.copy_from_slice(&rgba[..channels]);
                }
                ChannelFormat::Bit16 => {
                    let rgba = TextureSwizzler::reorder(source.texel_f32(index), swizzle);
                    for (c, value) in rgba[..channels].iter().enumerate() {
                        LittleEndian::write_u16(&mut out[c * 2..], unorm16(*value));
                    }
                }
                ChannelFormat::Float16 => {
                    let rgba = TextureSwizzler::reorder(source.texel_f32(index), swizzle);
                    for (c, value) in rgba[..channels].iter().enumerate() {
                        LittleEndian::write_u16(&mut out[c * 2..], f32_to_f16_bits(*value));
                    }
                }
                ChannelFormat::Float32 => {
                    let rgba = TextureSwizzler::reorder(source.texel_f32(index), swizzle);
                    for (c, value) in rgba[..channels].iter().enumerate() {
                        LittleEndian::write_f32(&mut out[c * 4..], *value);
                    }
                }
                // Rejected above
                _ => {}
            }
        }

        mip_level.set_data(buffer);
        if swizzle {
            mip_set.swizzle = false;
        }
        Ok(())
    }

    /// Read one 4-channel level back as RGBA8
    ///
    /// Stored channels are taken as B,G,R,A when the swizzle flag is set.
    /// Float levels are clamped to 0..=1, not tone mapped.
    pub fn read_rgba8(mip_set: &MipSet, level: usize, face_or_slice: usize) -> Result<Vec<u8>> {
        let texels = Self::read_rgba_f32(mip_set, level, face_or_slice)?;
        Ok(texels.into_iter().map(unorm8).collect())
    }

    /// Read one 4-channel level back as RGBA floats, honouring swizzle
    ///
    /// 8 and 16-bit channels are normalized to 0..=1.
    pub fn read_rgba_f32(mip_set: &MipSet, level: usize, face_or_slice: usize) -> Result<Vec<f32>> {
        if mip_set.data_type.channel_count() != 4 {
            return Err(TextureIoError::unsupported(format!(
                "cannot read {:?} data as RGBA",
                mip_set.data_type
            )));
        }

        let mip_level = mip_set
            .mip_level(level, face_or_slice)
            .ok_or(TextureIoError::LevelOutOfRange {
                level,
                face_or_slice,
            })?;

        let (width, height) = (mip_level.width, mip_level.height);
        let expected = Self::checked_shape(width, height, mip_set.channel_format, mip_set.data_type)
            .ok_or(TextureIoError::InvalidDimensions { width, height })?;
        if mip_level.len() != expected {
            return Err(TextureIoError::size_mismatch(expected, mip_level.len()));
        }

        let data = mip_level.data();
        let mut values: Vec<f32> = match mip_set.channel_format {
            ChannelFormat::Bit8 => data.iter().map(|&b| b as f32 / 255.0).collect(),
            ChannelFormat::Bit16 => data
                .chunks_exact(2)
                .map(|c| LittleEndian::read_u16(c) as f32 / 65535.0)
                .collect(),
            ChannelFormat::Float16 => data
                .chunks_exact(2)
                .map(|c| f16_bits_to_f32(LittleEndian::read_u16(c)))
                .collect(),
            ChannelFormat::Float32 => data.chunks_exact(4).map(LittleEndian::read_f32).collect(),
            other => {
                return Err(TextureIoError::unsupported(format!(
                    "cannot read {:?} level as RGBA",
                    other
                )));
            }
        };

        if mip_set.swizzle {
            TextureSwizzler::swap_rb_channels(&mut values);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_level(width: u32, height: u32, cf: ChannelFormat, dt: DataType) -> MipSet {
        let mut set = MipSet::new(width, height, cf, dt);
        set.mip_levels = 1;
        set.reset_levels();
        set
    }

    #[test]
    fn test_bytes_per_pixel() {
        use ChannelFormat::*;
        assert_eq!(MipBufferShaper::bytes_per_pixel(Bit8, DataType::R), 1);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Bit8, DataType::RG), 2);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Bit8, DataType::XRGB), 4);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Float16, DataType::ARGB), 8);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Bit16, DataType::RG), 4);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Float32, DataType::ARGB), 16);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Bit32, DataType::R), 4);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Bit2101010, DataType::ARGB), 4);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Float9995E, DataType::ARGB), 4);
        assert_eq!(MipBufferShaper::bytes_per_pixel(Compressed, DataType::ARGB), 0);
    }

    #[test]
    fn test_shape() {
        assert_eq!(MipBufferShaper::shape(4, 4, ChannelFormat::Bit8, DataType::ARGB), 64);
        assert_eq!(MipBufferShaper::shape(4, 4, ChannelFormat::Float16, DataType::R), 32);
        assert_eq!(MipBufferShaper::shape(3, 5, ChannelFormat::Bit8, DataType::R), 15);
    }

    #[test]
    fn test_shape_overflow() {
        assert_eq!(
            MipBufferShaper::checked_shape(u32::MAX, u32::MAX, ChannelFormat::Float32, DataType::ARGB),
            None
        );
        assert_eq!(
            MipBufferShaper::shape(u32::MAX, u32::MAX, ChannelFormat::Float32, DataType::ARGB),
            usize::MAX
        );
        assert_eq!(
            MipBufferShaper::checked_shape(4, 4, ChannelFormat::Bit8, DataType::ARGB),
            Some(64)
        );
        assert_eq!(
            MipBufferShaper::compressed_size(PixelFormat::BC7, u32::MAX, u32::MAX, BlockShape::default()),
            usize::MAX
        );
    }

    #[test]
    fn test_fill_rejects_overflowing_level() {
        let mut set = single_level(1, 1, ChannelFormat::Float32, DataType::ARGB);
        set.mip_level_mut(0, 0).unwrap().width = u32::MAX;
        set.mip_level_mut(0, 0).unwrap().height = u32::MAX;

        let err = MipBufferShaper::fill(&mut set, 0, 0, PixelSource::RgbaF32(&[0.0; 4])).unwrap_err();
        assert!(matches!(err, TextureIoError::InvalidDimensions { .. }));
        let err = MipBufferShaper::read_rgba_f32(&set, 0, 0).unwrap_err();
        assert!(matches!(err, TextureIoError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_compressed_size() {
        let shape = BlockShape::default();
        assert_eq!(MipBufferShaper::compressed_size(PixelFormat::BC1, 4, 4, shape), 8);
        assert_eq!(MipBufferShaper::compressed_size(PixelFormat::BC7, 5, 5, shape), 64);
        assert_eq!(MipBufferShaper::compressed_size(PixelFormat::ETC2_RGB, 1, 1, shape), 8);

        let astc = BlockShape::new(12, 10).unwrap();
        assert_eq!(MipBufferShaper::compressed_size(PixelFormat::ASTC, 24, 21, astc), 2 * 3 * 16);
        assert_eq!(MipBufferShaper::compressed_size(PixelFormat::R_8, 4, 4, shape), 0);
    }

    #[test]
    fn test_fill_bit8_plain() {
        let mut set = single_level(1, 2, ChannelFormat::Bit8, DataType::ARGB);
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        MipBufferShaper::fill(&mut set, 0, 0, PixelSource::Rgba8(&src)).unwrap();
        assert_eq!(set.mip_level(0, 0).unwrap().data(), &src);
    }

    #[test]
    fn test_fill_swizzle_clears_flag() {
        let mut set = single_level(1, 1, ChannelFormat::Bit8, DataType::ARGB);
        set.swizzle = true;
        MipBufferShaper::fill(&mut set, 0, 0, PixelSource::Rgba8(&[10, 20, 30, 40])).unwrap();
        assert!(!set.swizzle);
        assert_eq!(set.mip_level(0, 0).unwrap().data(), &[30, 20, 10, 40]);
    }

    #[test]
    fn test_fill_float16_single_channel() {
        let mut set = single_level(2, 1, ChannelFormat::Float16, DataType::R);
        let src = [1.0f32, 0.0, 0.0, 1.0, 0.5, 0.0, 0.0, 1.0];
        MipBufferShaper::fill(&mut set, 0, 0, PixelSource::RgbaF32(&src)).unwrap();
        assert_eq!(set.mip_level(0, 0).unwrap().data(), &[0x00, 0x3C, 0x00, 0x38]);
    }

    #[test]
    fn test_fill_rejects_wrong_length() {
        let mut set = single_level(2, 2, ChannelFormat::Bit8, DataType::ARGB);
        let err = MipBufferShaper::fill(&mut set, 0, 0, PixelSource::Rgba8(&[0; 12])).unwrap_err();
        assert!(matches!(
            err,
            TextureIoError::BufferSizeMismatch {
                expected: 16,
                actual: 12
            }
        ));

        let err = MipBufferShaper::fill(&mut set, 1, 0, PixelSource::Rgba8(&[0; 16])).unwrap_err();
        assert!(matches!(err, TextureIoError::LevelOutOfRange { level: 1, .. }));
    }

    #[test]
    fn test_read_float32_honours_swizzle() {
        let mut set = single_level(1, 1, ChannelFormat::Float32, DataType::ARGB);
        MipBufferShaper::fill(&mut set, 0, 0, PixelSource::RgbaF32(&[0.25, 0.5, 0.75, 1.0])).unwrap();
        assert_eq!(
            MipBufferShaper::read_rgba_f32(&set, 0, 0).unwrap(),
            vec![0.25, 0.5, 0.75, 1.0]
        );

        set.swizzle = true;
        assert_eq!(
            MipBufferShaper::read_rgba_f32(&set, 0, 0).unwrap(),
            vec![0.75, 0.5, 0.25, 1.0]
        );
        assert_eq!(MipBufferShaper::read_rgba8(&set, 0, 0).unwrap(), vec![191, 128, 64, 255]);
    }
}
