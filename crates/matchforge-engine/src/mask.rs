//! Masking engine: remove a consumed candidate from every combination.
//!
//! Once a candidate is committed to any target, every cell in every score
//! tensor whose combination includes that candidate on any axis must be set
//! to negative infinity. Ranks 1-3 get specialized paths; every other rank
//! falls through to a generic hyperplane walk, so no arity is unsupported.

use num_traits::Float;

use matchforge_core::ScoreTensor;

/// Sets every cell referencing `candidate` on any axis to negative infinity.
///
/// Idempotent: masking the same candidate twice leaves the tensor unchanged
/// after the first call.
pub fn mask_candidate<F: Float>(tensor: &mut ScoreTensor<F>, candidate: usize) {
    debug_assert!(
        candidate < tensor.extent(),
        "candidate {candidate} out of range for extent {}",
        tensor.extent()
    );

    match tensor.rank() {
        1 => mask_rank1(tensor, candidate),
        2 => mask_rank2(tensor, candidate),
        3 => mask_rank3(tensor, candidate),
        _ => mask_generic(tensor, candidate),
    }
}

/// Rank 1: a single cell.
fn mask_rank1<F: Float>(tensor: &mut ScoreTensor<F>, candidate: usize) {
    tensor.as_mut_slice()[candidate] = F::neg_infinity();
}

/// Rank 2: the row and column at `candidate`.
fn mask_rank2<F: Float>(tensor: &mut ScoreTensor<F>, candidate: usize) {
    let extent = tensor.extent();
    let neg_inf = F::neg_infinity();
    let data = tensor.as_mut_slice();

    for cell in &mut data[candidate * extent..(candidate + 1) * extent] {
        *cell = neg_inf;
    }
    for row in 0..extent {
        data[row * extent + candidate] = neg_inf;
    }
}

/// Rank 3: the three orthogonal slabs at `candidate`.
fn mask_rank3<F: Float>(tensor: &mut ScoreTensor<F>, candidate: usize) {
    let extent = tensor.extent();
    let plane = extent * extent;
    let neg_inf = F::neg_infinity();
    let data = tensor.as_mut_slice();

    for cell in &mut data[candidate * plane..(candidate + 1) * plane] {
        *cell = neg_inf;
    }
    for outer in 0..extent {
        let row_start = outer * plane + candidate * extent;
        for cell in &mut data[row_start..row_start + extent] {
            *cell = neg_inf;
        }
    }
    for outer in 0..extent {
        for mid in 0..extent {
            data[outer * plane + mid * extent + candidate] = neg_inf;
        }
    }
}

/// Any rank: for each axis, walk the hyperplane `axis == candidate`.
///
/// For axis stride `s`, the cells with coordinate `candidate` on that axis
/// sit at `block_start + candidate * s + inner` for every block of size
/// `s * extent` and every `inner < s`.
fn mask_generic<F: Float>(tensor: &mut ScoreTensor<F>, candidate: usize) {
    let extent = tensor.extent();
    let len = tensor.len();
    let neg_inf = F::neg_infinity();
    let strides: Vec<usize> = tensor.codec().strides().to_vec();
    let data = tensor.as_mut_slice();

    for stride in strides {
        let block = stride * extent;
        for block_start in (0..len).step_by(block) {
            let plane_start = block_start + candidate * stride;
            for cell in &mut data[plane_start..plane_start + stride] {
                *cell = neg_inf;
            }
        }
    }
}
