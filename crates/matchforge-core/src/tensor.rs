//! Owned flat score buffers with explicit shape metadata.
//!
//! A score tensor owns its flat buffer and a [`CombinationCodec`] describing
//! the rank-`r` cube the buffer represents. Multi-dimensional access is
//! computed from strides; there is no reshaping or aliasing, so each event
//! task can mutate its private copy freely.

use num_traits::Float;

use crate::codec::CombinationCodec;
use crate::error::{MatchForgeError, Result};

/// A dense rank-`r` score tensor of side `extent`, stored flattened.
///
/// Cells hold the model's score for one combination of candidates; negative
/// infinity marks a combination as invalid or already consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTensor<F> {
    data: Vec<F>,
    codec: CombinationCodec,
}

impl<F: Float> ScoreTensor<F> {
    /// Wraps a flat buffer as a rank-`rank` tensor of side `extent`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchForgeError::TensorShape`] if the buffer length is not
    /// exactly `extent^rank`.
    pub fn from_flat(data: Vec<F>, rank: usize, extent: usize) -> Result<Self> {
        let codec = CombinationCodec::new(rank, extent);
        if data.len() != codec.len() {
            return Err(MatchForgeError::TensorShape {
                expected: codec.len(),
                actual: data.len(),
            });
        }
        Ok(ScoreTensor { data, codec })
    }

    /// Creates a tensor with every cell set to `value`.
    pub fn filled(value: F, rank: usize, extent: usize) -> Self {
        let codec = CombinationCodec::new(rank, extent);
        ScoreTensor {
            data: vec![value; codec.len()],
            codec,
        }
    }

    /// Creates a fully invalidated tensor (every cell negative infinity).
    pub fn neg_infinity(rank: usize, extent: usize) -> Self {
        Self::filled(F::neg_infinity(), rank, extent)
    }

    /// Tensor rank (the owning target's arity).
    pub fn rank(&self) -> usize {
        self.codec.rank()
    }

    /// Candidate count per axis.
    pub fn extent(&self) -> usize {
        self.codec.extent()
    }

    /// Total cell count, `extent^rank`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a tensor holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The codec translating between flat and per-slot indices.
    pub fn codec(&self) -> &CombinationCodec {
        &self.codec
    }

    /// Cell value at a flat position.
    pub fn get(&self, flat: usize) -> F {
        self.data[flat]
    }

    /// Cell value at per-slot candidate indices.
    pub fn at(&self, indices: &[usize]) -> F {
        self.data[self.codec.ravel(indices)]
    }

    /// The flat buffer.
    pub fn as_slice(&self) -> &[F] {
        &self.data
    }

    /// The flat buffer, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [F] {
        &mut self.data
    }

    /// Sets every cell to `value`, invalidating the whole tensor when given
    /// negative infinity.
    pub fn fill(&mut self, value: F) {
        for cell in &mut self.data {
            *cell = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_validates_length() {
        let tensor = ScoreTensor::from_flat(vec![0.0f32; 9], 2, 3).unwrap();
        assert_eq!(tensor.rank(), 2);
        assert_eq!(tensor.extent(), 3);
        assert_eq!(tensor.len(), 9);

        let err = ScoreTensor::from_flat(vec![0.0f32; 8], 2, 3).unwrap_err();
        assert!(matches!(
            err,
            MatchForgeError::TensorShape {
                expected: 9,
                actual: 8,
            }
        ));
    }

    #[test]
    fn test_at_uses_strides() {
        let data: Vec<f32> = (0..27).map(|v| v as f32).collect();
        let tensor = ScoreTensor::from_flat(data, 3, 3).unwrap();
        assert_eq!(tensor.at(&[0, 0, 0]), 0.0);
        assert_eq!(tensor.at(&[1, 2, 0]), 15.0);
        assert_eq!(tensor.at(&[2, 2, 2]), 26.0);
    }

    #[test]
    fn test_fill_invalidates() {
        let mut tensor = ScoreTensor::from_flat(vec![1.0f32; 4], 2, 2).unwrap();
        tensor.fill(f32::NEG_INFINITY);
        assert!(tensor.as_slice().iter().all(|v| *v == f32::NEG_INFINITY));
    }

    #[test]
    fn test_neg_infinity_constructor() {
        let tensor = ScoreTensor::<f64>::neg_infinity(1, 5);
        assert_eq!(tensor.len(), 5);
        assert!(tensor.as_slice().iter().all(|v| *v == f64::NEG_INFINITY));
    }
}
