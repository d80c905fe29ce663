//! Pixel format resolution from a MipSet's channel layout

use super::formats::FormatTable;
use texture_io_core::{ChannelFormat, DataType, MipSet, PixelFormat};

/// Derives the [`PixelFormat`] a MipSet's buffers are laid out in
pub struct ChannelFormatResolver;

impl ChannelFormatResolver {
    /// Resolve the pixel format of a MipSet
    ///
    /// Uncompressed sets resolve from channel format and data type.
    /// Compressed sets resolve from the secondary tag when non-zero, else
    /// from the primary tag.
    pub fn resolve(mip_set: Option<&MipSet>) -> PixelFormat {
        let Some(set) = mip_set else {
            return PixelFormat::Unknown;
        };

        match set.channel_format {
            ChannelFormat::Bit8 => Self::by_data_type(
                set.data_type,
                PixelFormat::R_8,
                PixelFormat::RG_8,
                PixelFormat::ARGB_8888,
            ),
            ChannelFormat::Float16 => Self::by_data_type(
                set.data_type,
                PixelFormat::R_16F,
                PixelFormat::RG_16F,
                PixelFormat::ARGB_16F,
            ),
            ChannelFormat::Float32 => Self::by_data_type(
                set.data_type,
                PixelFormat::R_32F,
                PixelFormat::RG_32F,
                PixelFormat::ARGB_32F,
            ),
            ChannelFormat::Bit16 => Self::by_data_type(
                set.data_type,
                PixelFormat::R_16,
                PixelFormat::RG_16,
                PixelFormat::ARGB_16,
            ),
            ChannelFormat::Bit32 => Self::by_data_type(
                set.data_type,
                PixelFormat::R_32,
                PixelFormat::RG_32,
                PixelFormat::ARGB_32,
            ),
            ChannelFormat::Float9995E => PixelFormat::RGBE_32F,
            ChannelFormat::Bit2101010 => PixelFormat::ARGB_2101010,
            ChannelFormat::Compressed => {
                let tag = if set.fourcc2.is_none() {
                    set.fourcc
                } else {
                    set.fourcc2
                };
                FormatTable::tag_to_format(tag)
            }
        }
    }

    fn by_data_type(
        data_type: DataType,
        r: PixelFormat,
        rg: PixelFormat,
        argb: PixelFormat,
    ) -> PixelFormat {
        match data_type {
            DataType::R => r,
            DataType::RG => rg,
            DataType::XRGB | DataType::ARGB => argb,
        }
    }
}
