//! Channel order swizzling
//!
//! Containers that store colour channels blue-first are swizzled on the way
//! in and out. Alpha never moves.

/// Channel swizzling utility
pub struct TextureSwizzler;

impl TextureSwizzler {
    /// Output order of the four RGBA source channels
    pub fn channel_order(swizzle: bool) -> [usize; 4] {
        if swizzle { [2, 1, 0, 3] } else { [0, 1, 2, 3] }
    }

    /// Swap red and blue in every 4-channel texel in place
    pub fn swap_rb_channels<T>(texels: &mut [T]) {
        for texel in texels.chunks_exact_mut(4) {
            texel.swap(0, 2);
        }
    }

    /// Copy of `rgba` in the order dictated by `swizzle`
    pub fn reorder<T: Copy>(rgba: [T; 4], swizzle: bool) -> [T; 4] {
        let order = Self::channel_order(swizzle);
        [rgba[order[0]], rgba[order[1]], rgba[order[2]], rgba[order[3]]]
    }
}
