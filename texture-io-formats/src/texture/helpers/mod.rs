//! Pixel helpers
//!
//! - `half` - f16/f32 scalar conversion
//! - `swizzler` - R/B channel order handling
//! - `tonemap` - HDR to 8-bit mapping for image encoders

pub mod half;
pub mod swizzler;
pub mod tonemap;

pub use half::{f16_bits_to_f32, f32_to_f16_bits};
pub use swizzler::TextureSwizzler;
pub use tonemap::{tone_map_channel, tone_map_rgba};
