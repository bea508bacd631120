//! Greedy selector: the best remaining combination across all targets.

use num_traits::Float;

use matchforge_core::ScoreTensor;

/// The winning combination of one selection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<F> {
    /// Index of the target whose tensor holds the maximum.
    pub target: usize,
    /// Flat position of the maximum within that tensor.
    pub flat_index: usize,
    /// The maximum score itself.
    pub score: F,
}

/// Scans every tensor and returns the globally maximal finite score.
///
/// Ties resolve by scan order: the first target (lowest index) achieving the
/// maximum wins, then the first flat position within that tensor. Returns
/// `None` when no finite score remains; negative infinity never compares
/// greater than itself, so fully invalidated tensors can never win.
pub fn best_combination<F: Float>(tensors: &[ScoreTensor<F>]) -> Option<Selection<F>> {
    let mut best: Option<Selection<F>> = None;
    let mut best_score = F::neg_infinity();

    for (target, tensor) in tensors.iter().enumerate() {
        for (flat_index, &score) in tensor.as_slice().iter().enumerate() {
            if score > best_score {
                best_score = score;
                best = Some(Selection {
                    target,
                    flat_index,
                    score,
                });
            }
        }
    }

    best.filter(|selection| selection.score.is_finite())
}
