//! Flat-index / multi-index conversion for variable-rank combination spaces.
//!
//! A target of arity `r` over `J` candidates scores every combination in an
//! `r`-dimensional cube of side `J`, stored flattened. The codec owns the
//! row-major strides for that cube and converts between the flat position of
//! a cell and the per-slot candidate indices it represents.

use smallvec::SmallVec;

/// Inline capacity for per-slot index vectors.
///
/// Observed arities are small (up to 3 in practice); anything larger spills
/// to the heap without changing behavior.
pub const INLINE_RANK: usize = 4;

/// One candidate index per slot of a target.
pub type SlotIndices = SmallVec<[usize; INLINE_RANK]>;

/// Row-major strides for a `rank`-dimensional cube of side `extent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationCodec {
    extent: usize,
    strides: SmallVec<[usize; INLINE_RANK]>,
}

impl CombinationCodec {
    /// Creates the codec for a `rank`-dimensional cube of side `extent`.
    ///
    /// The last stride is 1 and each earlier stride is the next one times
    /// `extent`, so `strides[0] * extent == extent^rank`.
    pub fn new(rank: usize, extent: usize) -> Self {
        debug_assert!(rank >= 1, "codec rank must be at least 1");
        debug_assert!(extent >= 1, "codec extent must be at least 1");

        let mut strides: SmallVec<[usize; INLINE_RANK]> = SmallVec::with_capacity(rank);
        strides.resize(rank, 1);
        for i in (0..rank.saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * extent;
        }
        CombinationCodec { extent, strides }
    }

    /// Number of slots (tensor rank).
    pub fn rank(&self) -> usize {
        self.strides.len()
    }

    /// Candidate count per axis.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Total number of combinations, `extent^rank`.
    pub fn len(&self) -> usize {
        self.strides[0] * self.extent
    }

    /// Always false; a codec describes at least one combination.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The row-major stride vector.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Decodes a flat position into per-slot candidate indices.
    ///
    /// Precondition: `flat < self.len()`. The caller guards this; the codec
    /// only debug-asserts it.
    pub fn unravel(&self, flat: usize) -> SlotIndices {
        debug_assert!(flat < self.len(), "flat index {flat} out of range");

        let mut indices = SlotIndices::with_capacity(self.rank());
        let mut remainder = flat;
        for &stride in &self.strides {
            indices.push(remainder / stride);
            remainder %= stride;
        }
        indices
    }

    /// Encodes per-slot candidate indices into a flat position.
    ///
    /// Exact inverse of [`unravel`](Self::unravel) for valid inputs.
    pub fn ravel(&self, indices: &[usize]) -> usize {
        debug_assert_eq!(indices.len(), self.rank(), "slot count mismatch");

        indices
            .iter()
            .zip(&self.strides)
            .map(|(index, stride)| index * stride)
            .sum()
    }
}
