//! Half-float conversion helpers

use half::f16;

/// Widen IEEE 754 binary16 bits to `f32`
pub fn f16_bits_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Narrow an `f32` to IEEE 754 binary16 bits, rounding to nearest even
pub fn f32_to_f16_bits(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}
