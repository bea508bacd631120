//! Single-event greedy extraction loop.
//!
//! Repeatedly commits the highest-scoring remaining combination, invalidates
//! the winning target's tensor, and masks every consumed candidate out of
//! every tensor. Each iteration permanently resolves one target, so the loop
//! runs at most once per target.

use std::fmt::Debug;

use num_traits::Float;

use matchforge_core::{EventAssignment, MatchForgeError, Result, ScoreTensor, TargetCatalog};

use crate::mask::mask_candidate;
use crate::select::best_combination;

/// Extracts a mutually exclusive assignment for one event.
///
/// Validates tensors against the catalog, then consumes them via the greedy
/// loop. The tensors are mutated in place; pass private copies when the
/// originals must survive.
///
/// # Errors
///
/// Returns an error before any extraction when the tensor count, a tensor's
/// rank, or an axis extent disagrees with the catalog.
pub fn extract_event<F: Float + Debug>(
    tensors: &mut [ScoreTensor<F>],
    catalog: &TargetCatalog,
) -> Result<EventAssignment<F>> {
    validate_event(tensors, catalog)?;
    Ok(run_extraction(tensors, catalog))
}

/// Checks one event's tensors against the catalog.
///
/// Shape violations are fatal preconditions, rejected before the loop and
/// never coerced.
pub(crate) fn validate_event<F: Float>(
    tensors: &[ScoreTensor<F>],
    catalog: &TargetCatalog,
) -> Result<()> {
    if tensors.len() != catalog.len() {
        return Err(MatchForgeError::TargetCountMismatch {
            expected: catalog.len(),
            actual: tensors.len(),
        });
    }

    let extent = tensors[0].extent();
    for (target, tensor) in tensors.iter().enumerate() {
        if tensor.rank() != catalog.arity(target) {
            return Err(MatchForgeError::ArityMismatch {
                target,
                declared: catalog.arity(target),
                actual: tensor.rank(),
            });
        }
        if tensor.extent() != extent {
            return Err(MatchForgeError::ExtentMismatch {
                target,
                expected: extent,
                actual: tensor.extent(),
            });
        }
    }
    Ok(())
}

/// The greedy loop proper. Callers have already validated shapes.
pub(crate) fn run_extraction<F: Float + Debug>(
    tensors: &mut [ScoreTensor<F>],
    catalog: &TargetCatalog,
) -> EventAssignment<F> {
    let mut assignment = EventAssignment::new(catalog.len(), catalog.max_arity());

    // One committed target per iteration bounds the loop at catalog.len().
    for _ in 0..catalog.len() {
        let Some(selection) = best_combination(tensors) else {
            tracing::trace!("no finite score remains, stopping early");
            break;
        };

        let candidates = tensors[selection.target].codec().unravel(selection.flat_index);
        tracing::trace!(
            target_index = selection.target,
            target_name = catalog.get(selection.target).name(),
            score = ?selection.score,
            candidates = ?candidates.as_slice(),
            "committing assignment"
        );

        assignment.commit(selection.target, &candidates, selection.score);

        // The winner never competes again this event.
        tensors[selection.target].fill(F::neg_infinity());

        // Consumed candidates leave every tensor, the winner's included.
        for &candidate in &candidates {
            for tensor in tensors.iter_mut() {
                mask_candidate(tensor, candidate);
            }
        }
    }

    assignment.clear_unresolved();
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchforge_core::{TargetCatalog, UNUSED_SLOT};
    use matchforge_test::events::{all_invalid_event, mixed_arity_event, two_rank1_targets};

    #[test]
    fn test_two_rank1_targets_scenario() {
        let (catalog, mut tensors) = two_rank1_targets();
        let assignment = extract_event(&mut tensors, &catalog).unwrap();

        // First pass takes 0.9 at index 1; masking leaves [0.3, -inf, 0.05]
        // for the second target, whose best is then 0.3 at index 0.
        assert_eq!(assignment.slot_row(0), &[1]);
        assert_eq!(assignment.slot_row(1), &[0]);
        assert_eq!(assignment.weight_row(0), &[0.9]);
        assert_eq!(assignment.weight_row(1), &[0.3]);
    }

    #[test]
    fn test_mixed_arity_scenario() {
        let (catalog, mut tensors) = mixed_arity_event();
        let assignment = extract_event(&mut tensors, &catalog).unwrap();

        // The rank-2 maximum at (1, 2) wins first; candidates 1 and 2 then
        // vanish from the rank-1 target, leaving it candidate 0.
        assert_eq!(assignment.slot_row(0), &[1, 2]);
        assert_eq!(assignment.weight_row(0), &[0.95, 0.95]);
        assert_eq!(assignment.slot_row(1), &[0, UNUSED_SLOT]);
        assert_eq!(assignment.weight_row(1)[1], f32::NEG_INFINITY);
    }

    #[test]
    fn test_all_invalid_terminates_unresolved() {
        let (catalog, mut tensors) = all_invalid_event(&[1, 2], 3).unwrap();
        let assignment = extract_event(&mut tensors, &catalog).unwrap();

        for t in 0..2 {
            assert!(!assignment.is_resolved(t));
            assert_eq!(assignment.slot_row(t), &[UNUSED_SLOT, UNUSED_SLOT]);
            assert!(assignment
                .weight_row(t)
                .iter()
                .all(|w| *w == f32::NEG_INFINITY));
        }
    }

    #[test]
    fn test_exhaustion_leaves_tensors_fully_invalid() {
        let (catalog, mut tensors) = two_rank1_targets();
        extract_event(&mut tensors, &catalog).unwrap();

        // Every target resolved, so a further selection finds nothing.
        assert!(best_combination(&tensors).is_none());
    }

    #[test]
    fn test_exclusivity_across_targets() {
        let (catalog, mut tensors) = mixed_arity_event();
        let assignment = extract_event(&mut tensors, &catalog).unwrap();

        let consumed = assignment.consumed_candidates();
        let mut deduped = consumed.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(consumed.len(), deduped.len(), "candidate consumed twice");
    }

    #[test]
    fn test_partial_resolution_when_candidates_run_out() {
        // Three rank-1 targets over two candidates: only two can resolve.
        let catalog = TargetCatalog::from_arities(&[1, 1, 1]).unwrap();
        let mut tensors = vec![
            ScoreTensor::from_flat(vec![0.9f32, 0.1], 1, 2).unwrap(),
            ScoreTensor::from_flat(vec![0.2, 0.8], 1, 2).unwrap(),
            ScoreTensor::from_flat(vec![0.3, 0.4], 1, 2).unwrap(),
        ];
        let assignment = extract_event(&mut tensors, &catalog).unwrap();

        assert_eq!(assignment.slot_row(0), &[0]);
        assert_eq!(assignment.slot_row(1), &[1]);
        assert_eq!(assignment.slot_row(2), &[UNUSED_SLOT]);
        assert!(!assignment.is_resolved(2));
    }

    #[test]
    fn test_validation_rejects_arity_mismatch() {
        let catalog = TargetCatalog::from_arities(&[2]).unwrap();
        let mut tensors = vec![ScoreTensor::from_flat(vec![0.5f32; 3], 1, 3).unwrap()];
        let err = extract_event(&mut tensors, &catalog).unwrap_err();
        assert!(matches!(err, MatchForgeError::ArityMismatch { .. }));
    }

    #[test]
    fn test_validation_rejects_extent_mismatch() {
        let catalog = TargetCatalog::from_arities(&[1, 1]).unwrap();
        let mut tensors = vec![
            ScoreTensor::from_flat(vec![0.5f32; 3], 1, 3).unwrap(),
            ScoreTensor::from_flat(vec![0.5f32; 4], 1, 4).unwrap(),
        ];
        let err = extract_event(&mut tensors, &catalog).unwrap_err();
        assert!(matches!(err, MatchForgeError::ExtentMismatch { .. }));
    }

    #[test]
    fn test_validation_rejects_wrong_tensor_count() {
        let catalog = TargetCatalog::from_arities(&[1, 1]).unwrap();
        let mut tensors = vec![ScoreTensor::from_flat(vec![0.5f32; 3], 1, 3).unwrap()];
        let err = extract_event(&mut tensors, &catalog).unwrap_err();
        assert!(matches!(err, MatchForgeError::TargetCountMismatch { .. }));
    }

    #[test]
    fn test_greedy_commits_are_locally_optimal() {
        // Replay the loop by hand, checking each committed weight was the
        // maximum live score at its point in the sequence.
        let (catalog, tensors) = mixed_arity_event();
        let mut replay = tensors.clone();
        let mut committed = Vec::new();

        while let Some(selection) = best_combination(&replay) {
            let live_max = replay
                .iter()
                .flat_map(|t| t.as_slice().iter().copied())
                .fold(f32::NEG_INFINITY, f32::max);
            assert_eq!(selection.score, live_max);
            committed.push(selection.score);

            let candidates = replay[selection.target]
                .codec()
                .unravel(selection.flat_index);
            replay[selection.target].fill(f32::NEG_INFINITY);
            for &candidate in &candidates {
                for tensor in replay.iter_mut() {
                    mask_candidate(tensor, candidate);
                }
            }
        }

        assert!(committed.len() <= catalog.len(), "more commits than targets");
    }
}
