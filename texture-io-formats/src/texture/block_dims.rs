//! ASTC block footprint selection
//!
//! ASTC stores every block in 128 bits, so the footprint alone sets the
//! bitrate. These helpers pick the legal 2D footprint whose bitrate is
//! closest to a target.

use texture_io_core::{ASTC_BLOCK_BITS, ASTC_BLOCK_DIMS, BlockShape};

/// Error bound every real candidate beats
const INITIAL_ERROR: f32 = 1000.0;

/// Selects 2D ASTC block footprints
pub struct BlockDimensionSolver;

impl BlockDimensionSolver {
    /// Check if `(dims[i], dims[j])`, `i <= j`, is a legal footprint
    ///
    /// Legal footprints are square, adjacent in the candidate list, or one of
    /// 8x5, 10x5 and 10x6.
    pub fn is_legal_pair(i: usize, j: usize) -> bool {
        j == i || j == i + 1 || (j == 3 && i == 1) || (j == 4 && i == 1) || (j == 4 && i == 2)
    }

    /// Closest footprint to `target_bits_per_texel`
    ///
    /// Searches all 21 `i <= j` pairs. A strictly smaller bitrate error wins;
    /// an exact tie goes to the squarer shape. The wider edge is returned as
    /// `x`. A target no candidate gets within the error bound of (such as
    /// infinity or NaN) yields 4x4.
    pub fn closest_legal_block_shape(target_bits_per_texel: f32, allow_illegal: bool) -> BlockShape {
        let mut best = BlockShape::default();
        let mut best_error = INITIAL_ERROR;
        let mut aspect_of_best = 1.0f32;

        for (i, &dim_y) in ASTC_BLOCK_DIMS.iter().enumerate() {
            for (j, &dim_x) in ASTC_BLOCK_DIMS.iter().enumerate().skip(i) {
                if !allow_illegal && !Self::is_legal_pair(i, j) {
                    continue;
                }

                let bitrate = ASTC_BLOCK_BITS / (dim_x as f32 * dim_y as f32);
                let error = (bitrate - target_bits_per_texel).abs();
                let aspect = dim_x as f32 / dim_y as f32;

                if error < best_error || (error == best_error && aspect < aspect_of_best) {
                    if let Some(shape) = BlockShape::new(dim_x, dim_y) {
                        best = shape;
                        best_error = error;
                        aspect_of_best = aspect;
                    }
                }
            }
        }

        best
    }

    /// Snap an arbitrary footprint to the nearest legal one
    ///
    /// Candidate edges are ordered larger-first before the bitrate is taken;
    /// anything else is used as given. Never fails.
    pub fn snap_to_legal_shape(x: u32, y: u32) -> BlockShape {
        let is_candidate = |v: u32| ASTC_BLOCK_DIMS.iter().any(|&d| d as u32 == v);

        let (x, y) = if is_candidate(x) && is_candidate(y) && x < y {
            (y, x)
        } else {
            (x, y)
        };

        let bitrate = ASTC_BLOCK_BITS / (x as f32 * y as f32);
        Self::closest_legal_block_shape(bitrate, false)
    }
}
