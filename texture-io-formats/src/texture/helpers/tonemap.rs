//! HDR to 8-bit tone mapping
//!
//! Used when floating point textures are written through an 8-bit image
//! encoder. Values up to 1.0 pass the knee unchanged; brighter values are
//! compressed logarithmically so that 32.0 lands near full intensity.

/// Knee slope for kneeLow = 0, kneeHigh = 5
const KNEE_SLOPE: f32 = 0.184874;

/// Display gamma exponent (1 / 2.2)
const GAMMA: f32 = 0.4545;

/// Output level middle gray maps to, 3.5 stops below maximum
const MIDDLE_GRAY_SCALE: f32 = 84.66;

fn knee(v: f32) -> f32 {
    if v > 1.0 {
        1.0 + ((v - 1.0) * KNEE_SLOPE + 1.0).ln() / KNEE_SLOPE
    } else {
        v
    }
}

/// Tone map one channel value to 0..=255
pub fn tone_map_channel(v: f32) -> u8 {
    let mapped = knee(v).powf(GAMMA) * MIDDLE_GRAY_SCALE;
    // NaN from negative input clamps to 0 through the saturating cast
    mapped.clamp(0.0, 255.0) as u8
}

/// Tone map an RGBA texel
pub fn tone_map_rgba(rgba: [f32; 4]) -> [u8; 4] {
    rgba.map(tone_map_channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_anchors() {
        assert_eq!(tone_map_channel(0.0), 0);
        // 1.0 is middle gray
        assert_eq!(tone_map_channel(1.0), 84);
        assert!(tone_map_channel(32.0) > 200);
        assert_eq!(tone_map_channel(1.0e9), 255);
        assert_eq!(tone_map_channel(-1.0), 0);
    }

    #[test]
    fn test_tone_map_is_monotonic() {
        let mut last = 0;
        for step in 0..200 {
            let value = tone_map_channel(step as f32 * 0.25);
            assert!(value >= last);
            last = value;
        }
    }
}
