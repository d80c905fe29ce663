//! Fallback image loaders
//!
//! Used when no codec plugin is registered for a file's key. The facade only
//! sees the [`FallbackImageLoader`] trait; [`ImageCrateFallback`] is the
//! strategy built on the `image` crate and [`NoFallback`] turns a missing
//! plugin into a hard failure.

use super::allocation::SharedIo;
use super::extension::ExtensionClassifier;
use super::helpers::tonemap::tone_map_rgba;
use super::shaper::{MipBufferShaper, PixelSource};
use image::{ImageFormat, Rgba32FImage, RgbaImage};
use std::path::Path;
use texture_io_core::{
    ChannelFormat, DataType, FourCC, MipSet, PixelFormat, Result, TextureIoError, TextureType,
};
use tracing::debug;

/// Pixels decoded by a fallback loader, always R,G,B,A per texel
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedPixels {
    Rgba8(Vec<u8>),
    RgbaF32(Vec<f32>),
}

/// Image decoded by a fallback loader
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: DecodedPixels,
}

impl DecodedImage {
    /// Create an 8-bit image
    pub fn rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: DecodedPixels::Rgba8(pixels),
        }
    }

    /// Reset `mip_set` to a single-level 2D texture holding this image
    ///
    /// Tags and the decompression source are cleared. 8-bit images land as
    /// Bit8/ARGB_8888; float images land as Float16/ARGB_16F. Pixels are
    /// written honouring the MipSet's swizzle flag, which is cleared if it
    /// was applied.
    pub fn populate(&self, mip_set: &mut MipSet, shared_io: &dyn SharedIo) -> Result<()> {
        let (channel_format, format) = match self.pixels {
            DecodedPixels::Rgba8(_) => (ChannelFormat::Bit8, PixelFormat::ARGB_8888),
            DecodedPixels::RgbaF32(_) => (ChannelFormat::Float16, PixelFormat::ARGB_16F),
        };

        mip_set.fourcc = FourCC::NONE;
        mip_set.fourcc2 = FourCC::NONE;
        mip_set.decompressed_from = PixelFormat::Unknown;
        mip_set.format = format;
        shared_io.allocate_mip_set(
            mip_set,
            channel_format,
            DataType::ARGB,
            TextureType::TwoD,
            self.width,
            self.height,
            1,
        )?;
        mip_set.mip_levels = 1;
        mip_set.reset_levels();

        let source = match &self.pixels {
            DecodedPixels::Rgba8(p) => PixelSource::Rgba8(p),
            DecodedPixels::RgbaF32(p) => PixelSource::RgbaF32(p),
        };
        MipBufferShaper::fill(mip_set, 0, 0, source)
    }
}

/// Generic image loader used when no codec plugin matches
pub trait FallbackImageLoader: Send + Sync {
    /// False when this strategy never handles anything
    fn is_available(&self) -> bool {
        true
    }

    /// Decode the file at `path`
    fn load(&self, path: &Path) -> Result<DecodedImage>;

    /// Encode the top level of `mip_set` to `path`
    fn save(&self, path: &Path, mip_set: &MipSet) -> Result<()>;
}

/// Strategy with no fallback; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackImageLoader for NoFallback {
    fn is_available(&self) -> bool {
        false
    }

    fn load(&self, path: &Path) -> Result<DecodedImage> {
        Err(TextureIoError::fallback_decode(format!(
            "no fallback loader for {}",
            path.display()
        )))
    }

    fn save(&self, path: &Path, _mip_set: &MipSet) -> Result<()> {
        Err(TextureIoError::fallback_encode(format!(
            "no fallback loader for {}",
            path.display()
        )))
    }
}

/// Fallback strategy backed by the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateFallback {
    exr_as_half: bool,
}

impl ImageCrateFallback {
    /// Create a fallback loader; `exr_as_half` keeps `.exr` files in half floats
    pub fn new(exr_as_half: bool) -> Self {
        Self { exr_as_half }
    }

    fn check_encodable(mip_set: &MipSet) -> Result<()> {
        if mip_set.compressed || mip_set.channel_format == ChannelFormat::Compressed {
            return Err(TextureIoError::fallback_encode(
                "compressed data must be decompressed before saving",
            ));
        }
        if !matches!(mip_set.data_type, DataType::ARGB | DataType::XRGB) {
            return Err(TextureIoError::fallback_encode(format!(
                "cannot encode {:?} data",
                mip_set.data_type
            )));
        }
        if !matches!(
            mip_set.channel_format,
            ChannelFormat::Bit8 | ChannelFormat::Bit16 | ChannelFormat::Float16 | ChannelFormat::Float32
        ) {
            return Err(TextureIoError::fallback_encode(format!(
                "cannot encode {:?} channels",
                mip_set.channel_format
            )));
        }
        Ok(())
    }

    /// Convert the top level of `mip_set` to RGBA floats for a float encoder
    ///
    /// Values are passed through without tone mapping.
    pub fn to_rgba_f32(mip_set: &MipSet) -> Result<Vec<f32>> {
        Self::check_encodable(mip_set)?;

        let mut rgba = MipBufferShaper::read_rgba_f32(mip_set, 0, 0)?;
        if mip_set.data_type == DataType::XRGB {
            for texel in rgba.chunks_exact_mut(4) {
                texel[3] = 1.0;
            }
        }
        Ok(rgba)
    }

    /// Convert the top level of `mip_set` to RGBA8 for an 8-bit encoder
    pub fn to_rgba8(mip_set: &MipSet) -> Result<Vec<u8>> {
        Self::check_encodable(mip_set)?;

        let mut rgba = match mip_set.channel_format {
            ChannelFormat::Bit8 | ChannelFormat::Bit16 => MipBufferShaper::read_rgba8(mip_set, 0, 0)?,
            ChannelFormat::Float16 | ChannelFormat::Float32 => {
                let values = MipBufferShaper::read_rgba_f32(mip_set, 0, 0)?;
                values
                    .chunks_exact(4)
                    .flat_map(|t| tone_map_rgba([t[0], t[1], t[2], t[3]]))
                    .collect()
            }
            other => {
                return Err(TextureIoError::fallback_encode(format!(
                    "cannot encode {:?} channels",
                    other
                )));
            }
        };

        if mip_set.data_type == DataType::XRGB {
            for texel in rgba.chunks_exact_mut(4) {
                texel[3] = 255;
            }
        }
        Ok(rgba)
    }
}

impl Default for ImageCrateFallback {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FallbackImageLoader for ImageCrateFallback {
    fn load(&self, path: &Path) -> Result<DecodedImage> {
        let image = image::open(path).map_err(|e| {
            TextureIoError::fallback_decode(format!("Failed to decode {}: {}", path.display(), e))
        })?;
        let (width, height) = (image.width(), image.height());

        let is_exr = path
            .to_str()
            .is_some_and(|p| ExtensionClassifier::is_file_ext(p, "exr"));
        let pixels = if self.exr_as_half && is_exr {
            DecodedPixels::RgbaF32(image.into_rgba32f().into_raw())
        } else {
            DecodedPixels::Rgba8(image.into_rgba8().into_raw())
        };

        debug!("Fallback decoded {} ({}x{})", path.display(), width, height);
        Ok(DecodedImage {
            width,
            height,
            pixels,
        })
    }

    fn save(&self, path: &Path, mip_set: &MipSet) -> Result<()> {
        let level = mip_set
            .mip_level(0, 0)
            .ok_or(TextureIoError::LevelOutOfRange {
                level: 0,
                face_or_slice: 0,
            })?;
        let (width, height) = (level.width, level.height);

        let format = ImageFormat::from_path(path).map_err(|e| {
            TextureIoError::fallback_encode(format!("Unknown image type for {}: {}", path.display(), e))
        })?;
        let too_small =
            || TextureIoError::fallback_encode(format!("buffer does not hold {}x{} texels", width, height));

        // OpenEXR only takes float samples
        let saved = if format == ImageFormat::OpenExr {
            Rgba32FImage::from_raw(width, height, Self::to_rgba_f32(mip_set)?)
                .ok_or_else(too_small)?
                .save_with_format(path, format)
        } else {
            RgbaImage::from_raw(width, height, Self::to_rgba8(mip_set)?)
                .ok_or_else(too_small)?
                .save_with_format(path, format)
        };
        saved.map_err(|e| {
            TextureIoError::fallback_encode(format!("Failed to save {}: {}", path.display(), e))
        })?;

        debug!("Fallback encoded {} ({}x{})", path.display(), width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::allocation::MipAllocator;

    #[test]
    fn test_populate_resets_mip_set() {
        let mut set = MipSet::new(9, 9, ChannelFormat::Float32, DataType::R);
        set.fourcc = FourCC::DXT5;
        set.fourcc2 = FourCC::ATI2N_XY;
        set.texture_type = TextureType::Volume;
        set.swizzle = true;

        let image = DecodedImage::rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        image.populate(&mut set, &MipAllocator).unwrap();

        assert_eq!(set.channel_format, ChannelFormat::Bit8);
        assert_eq!(set.data_type, DataType::ARGB);
        assert_eq!(set.texture_type, TextureType::TwoD);
        assert_eq!(set.format, PixelFormat::ARGB_8888);
        assert!(set.fourcc.is_none() && set.fourcc2.is_none());
        assert_eq!(set.mip_levels, 1);
        assert_eq!(set.levels().len(), 1);
        assert!(!set.swizzle);
        assert_eq!(set.mip_level(0, 0).unwrap().data(), &[3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn test_populate_float_image() {
        let mut set = MipSet::new(16, 16, ChannelFormat::Bit8, DataType::ARGB);
        set.decompressed_from = PixelFormat::BC6H;

        let image = DecodedImage {
            width: 8,
            height: 8,
            pixels: DecodedPixels::RgbaF32([3.0f32, 0.5, 0.25, 1.0].repeat(64)),
        };
        image.populate(&mut set, &MipAllocator).unwrap();

        assert_eq!(set.channel_format, ChannelFormat::Float16);
        assert_eq!(set.format, PixelFormat::ARGB_16F);
        assert_eq!(set.decompressed_from, PixelFormat::Unknown);
        assert_eq!(set.mip_levels, 1);
        assert_eq!(set.levels().len(), 1);
        assert_eq!(set.mip_level(0, 0).unwrap().len(), 8 * 8 * 8);
        assert_eq!(
            MipBufferShaper::read_rgba_f32(&set, 0, 0).unwrap()[..4],
            [3.0, 0.5, 0.25, 1.0]
        );
    }

    #[test]
    fn test_to_rgba_f32_keeps_hdr_values() {
        let mut set = MipSet::new(1, 1, ChannelFormat::Float16, DataType::XRGB);
        set.mip_levels = 1;
        set.reset_levels();
        MipBufferShaper::fill(&mut set, 0, 0, PixelSource::RgbaF32(&[4.0, 0.5, 0.0, 0.0])).unwrap();

        assert_eq!(ImageCrateFallback::to_rgba_f32(&set).unwrap(), vec![4.0, 0.5, 0.0, 1.0]);

        set.channel_format = ChannelFormat::Bit32;
        assert!(matches!(
            ImageCrateFallback::to_rgba_f32(&set),
            Err(TextureIoError::FallbackEncodeFailed(_))
        ));
    }

    #[test]
    fn test_to_rgba8_rejects_unsupported_layouts() {
        let mut set = MipSet::new(1, 1, ChannelFormat::Compressed, DataType::ARGB);
        assert!(matches!(
            ImageCrateFallback::to_rgba8(&set),
            Err(TextureIoError::FallbackEncodeFailed(_))
        ));

        set.channel_format = ChannelFormat::Bit8;
        set.data_type = DataType::RG;
        assert!(matches!(
            ImageCrateFallback::to_rgba8(&set),
            Err(TextureIoError::FallbackEncodeFailed(_))
        ));
    }

    #[test]
    fn test_to_rgba8_tone_maps_floats() {
        let mut set = MipSet::new(1, 1, ChannelFormat::Float32, DataType::XRGB);
        set.mip_levels = 1;
        set.reset_levels();
        MipBufferShaper::fill(&mut set, 0, 0, PixelSource::RgbaF32(&[0.0, 1.0, 64.0, 0.0])).unwrap();

        let rgba = ImageCrateFallback::to_rgba8(&set).unwrap();
        assert_eq!(rgba, vec![0, 84, 255, 255]);
    }

    #[test]
    fn test_no_fallback() {
        assert!(!NoFallback.is_available());
        assert!(NoFallback.load(Path::new("a.png")).is_err());
    }
}
