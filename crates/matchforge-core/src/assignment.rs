//! Per-event assignment and weight rows.

use num_traits::Float;

/// Slot value for "slot not used": either the target's arity is below the
/// event's widest arity, or the target found no valid assignment and its row
/// was cleared.
pub const UNUSED_SLOT: i64 = -1;

/// Internal "never touched" sentinel. Rows still holding this when the
/// extraction loop finishes are cleared to [`UNUSED_SLOT`] before the result
/// is handed out, so callers never observe it.
pub const UNASSIGNED: i64 = -2;

/// The resolved assignment for one event.
///
/// One row per target, each row `max_arity` slots wide. A slot holds a
/// candidate index, or [`UNUSED_SLOT`] when the target uses fewer slots or
/// found no assignment. The weight rows mirror the slot rows: the winning
/// score broadcast across a resolved target's used slots, negative infinity
/// elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct EventAssignment<F> {
    slots: Vec<i64>,
    weights: Vec<F>,
    num_targets: usize,
    max_arity: usize,
}

impl<F: Float> EventAssignment<F> {
    /// Creates an unresolved assignment: every slot "never touched", every
    /// weight negative infinity.
    pub fn new(num_targets: usize, max_arity: usize) -> Self {
        EventAssignment {
            slots: vec![UNASSIGNED; num_targets * max_arity],
            weights: vec![F::neg_infinity(); num_targets * max_arity],
            num_targets,
            max_arity,
        }
    }

    /// Number of targets.
    pub fn num_targets(&self) -> usize {
        self.num_targets
    }

    /// Width of each row.
    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    /// The full slot row for target `t`, padded to `max_arity`.
    pub fn slot_row(&self, t: usize) -> &[i64] {
        let start = t * self.max_arity;
        &self.slots[start..start + self.max_arity]
    }

    /// The full weight row for target `t`, padded to `max_arity`.
    pub fn weight_row(&self, t: usize) -> &[F] {
        let start = t * self.max_arity;
        &self.weights[start..start + self.max_arity]
    }

    /// Whether target `t` committed an assignment.
    pub fn is_resolved(&self, t: usize) -> bool {
        self.slot_row(t)[0] >= 0
    }

    /// Commits a winning combination for target `t`.
    ///
    /// Writes the candidate indices into the leading slots, clears the
    /// remaining padding slots to [`UNUSED_SLOT`], and broadcasts `score`
    /// across the used weight slots.
    pub fn commit(&mut self, t: usize, candidates: &[usize], score: F) {
        debug_assert!(candidates.len() <= self.max_arity);

        let start = t * self.max_arity;
        for slot in 0..self.max_arity {
            if let Some(&candidate) = candidates.get(slot) {
                self.slots[start + slot] = candidate as i64;
                self.weights[start + slot] = score;
            } else {
                self.slots[start + slot] = UNUSED_SLOT;
                self.weights[start + slot] = F::neg_infinity();
            }
        }
    }

    /// Clears every still-untouched row to [`UNUSED_SLOT`].
    ///
    /// Called when the loop terminates early with targets left unresolved; a
    /// finished result never exposes [`UNASSIGNED`].
    pub fn clear_unresolved(&mut self) {
        for slot in &mut self.slots {
            if *slot == UNASSIGNED {
                *slot = UNUSED_SLOT;
            }
        }
    }

    /// Candidate indices consumed by resolved targets, in commit-row order.
    pub fn consumed_candidates(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|&&slot| slot >= 0)
            .map(|&slot| slot as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unresolved() {
        let assignment = EventAssignment::<f32>::new(2, 3);
        assert!(!assignment.is_resolved(0));
        assert!(!assignment.is_resolved(1));
        assert_eq!(assignment.slot_row(0), &[UNASSIGNED; 3]);
        assert!(assignment.weight_row(1).iter().all(|w| *w == f32::NEG_INFINITY));
    }

    #[test]
    fn test_commit_pads_short_arity() {
        let mut assignment = EventAssignment::<f32>::new(2, 3);
        assignment.commit(1, &[4], 0.75);
        assert_eq!(assignment.slot_row(1), &[4, UNUSED_SLOT, UNUSED_SLOT]);
        assert_eq!(assignment.weight_row(1)[0], 0.75);
        assert_eq!(assignment.weight_row(1)[1], f32::NEG_INFINITY);
        // Other rows untouched until cleared.
        assert_eq!(assignment.slot_row(0), &[UNASSIGNED; 3]);
    }

    #[test]
    fn test_clear_unresolved_removes_sentinel() {
        let mut assignment = EventAssignment::<f32>::new(2, 2);
        assignment.commit(0, &[1, 2], 0.9);
        assignment.clear_unresolved();
        assert_eq!(assignment.slot_row(0), &[1, 2]);
        assert_eq!(assignment.slot_row(1), &[UNUSED_SLOT, UNUSED_SLOT]);
        assert!(!assignment.slot_row(1).contains(&UNASSIGNED));
    }

    #[test]
    fn test_consumed_candidates() {
        let mut assignment = EventAssignment::<f32>::new(3, 2);
        assignment.commit(0, &[1, 2], 0.9);
        assignment.commit(2, &[0], 0.5);
        assignment.clear_unresolved();
        assert_eq!(assignment.consumed_candidates(), vec![1, 2, 0]);
    }
}
