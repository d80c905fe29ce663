//! ASTC Block Footprint Tests
//!
//! Checks the solver's choice against a brute-force recomputation over all
//! candidate pairs.

use texture_io_core::{ASTC_BLOCK_DIMS, BlockShape};
use texture_io_formats::BlockDimensionSolver;

fn index_of(dim: u8) -> usize {
    ASTC_BLOCK_DIMS
        .iter()
        .position(|&d| d == dim)
        .expect("dimension from candidate set")
}

fn bitrate(x: u8, y: u8) -> f32 {
    128.0 / (x as f32 * y as f32)
}

/// (error, aspect) of every pair the solver may consider
fn candidates(target: f32, allow_illegal: bool) -> Vec<(f32, f32)> {
    let mut out = Vec::new();
    for i in 0..ASTC_BLOCK_DIMS.len() {
        for j in i..ASTC_BLOCK_DIMS.len() {
            if allow_illegal || BlockDimensionSolver::is_legal_pair(i, j) {
                let (x, y) = (ASTC_BLOCK_DIMS[j], ASTC_BLOCK_DIMS[i]);
                out.push(((bitrate(x, y) - target).abs(), x as f32 / y as f32));
            }
        }
    }
    out
}

fn assert_optimal(target: f32, allow_illegal: bool, shape: BlockShape) {
    let (i, j) = (index_of(shape.y()), index_of(shape.x()));
    assert!(i <= j, "{} is not wider than tall", shape);
    if !allow_illegal {
        assert!(BlockDimensionSolver::is_legal_pair(i, j), "{} is illegal", shape);
    }

    let error = (bitrate(shape.x(), shape.y()) - target).abs();
    let aspect = shape.x() as f32 / shape.y() as f32;
    for (other_error, other_aspect) in candidates(target, allow_illegal) {
        assert!(error <= other_error, "target {}: {} beaten", target, shape);
        if error == other_error {
            assert!(aspect <= other_aspect, "target {}: {} not squarest", target, shape);
        }
    }
}

#[test]
fn test_legal_pairs() {
    let legal: Vec<String> = (0..6)
        .flat_map(|i| (i..6).map(move |j| (i, j)))
        .filter(|&(i, j)| BlockDimensionSolver::is_legal_pair(i, j))
        .map(|(i, j)| format!("{}x{}", ASTC_BLOCK_DIMS[j], ASTC_BLOCK_DIMS[i]))
        .collect();

    assert_eq!(
        legal,
        vec![
            "4x4", "5x4", "5x5", "6x5", "8x5", "10x5", "6x6", "8x6", "10x6", "8x8", "10x8",
            "10x10", "12x10", "12x12"
        ]
    );
}

#[test]
fn test_solver_is_optimal_over_target_sweep() {
    for step in 0..=900 {
        let target = step as f32 * 0.01;
        for allow_illegal in [false, true] {
            let shape = BlockDimensionSolver::closest_legal_block_shape(target, allow_illegal);
            assert_optimal(target, allow_illegal, shape);
        }
    }
}

#[test]
fn test_solver_hits_every_exact_legal_bitrate() {
    for i in 0..ASTC_BLOCK_DIMS.len() {
        for j in i..ASTC_BLOCK_DIMS.len() {
            let (x, y) = (ASTC_BLOCK_DIMS[j], ASTC_BLOCK_DIMS[i]);
            let shape = BlockDimensionSolver::closest_legal_block_shape(bitrate(x, y), false);
            if BlockDimensionSolver::is_legal_pair(i, j) {
                assert_eq!(bitrate(shape.x(), shape.y()), bitrate(x, y), "{}x{}", x, y);
            }
            assert_optimal(bitrate(x, y), false, shape);
        }
    }
}

#[test]
fn test_closest_to_3_56_is_6x6() {
    let shape = BlockDimensionSolver::closest_legal_block_shape(3.56, false);
    assert_eq!((shape.x(), shape.y()), (6, 6));
    assert_optimal(3.56, false, shape);
}

#[test]
fn test_snap_is_order_independent() {
    for &a in ASTC_BLOCK_DIMS.iter() {
        for &b in ASTC_BLOCK_DIMS.iter() {
            assert_eq!(
                BlockDimensionSolver::snap_to_legal_shape(a as u32, b as u32),
                BlockDimensionSolver::snap_to_legal_shape(b as u32, a as u32),
                "{}x{}",
                a,
                b
            );
        }
    }

    let snapped = BlockDimensionSolver::snap_to_legal_shape(8, 10);
    assert_eq!((snapped.x(), snapped.y()), (10, 8));
}

#[test]
fn test_snap_accepts_nonsense_dimensions() {
    // 7x3 is not a footprint; its 6.1 bpp lands on 5x4
    let snapped = BlockDimensionSolver::snap_to_legal_shape(7, 3);
    assert_eq!((snapped.x(), snapped.y()), (5, 4));

    let huge = BlockDimensionSolver::snap_to_legal_shape(1000, 1000);
    assert_eq!((huge.x(), huge.y()), (12, 12));
}
