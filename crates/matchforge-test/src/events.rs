//! Canned events with known greedy outcomes.

use matchforge_core::{Result, ScoreTensor, TargetCatalog};

/// Builds a tensor, panicking on bad shapes. Test-only convenience.
pub fn tensor(data: Vec<f32>, rank: usize, extent: usize) -> ScoreTensor<f32> {
    ScoreTensor::from_flat(data, rank, extent).expect("fixture shape")
}

/// Two rank-1 targets over three candidates.
///
/// Greedy resolves target 0 to candidate 1 (score 0.9) first; masking then
/// leaves target 1 its candidate 0 (score 0.3).
pub fn two_rank1_targets() -> (TargetCatalog, Vec<ScoreTensor<f32>>) {
    let catalog = TargetCatalog::from_arities(&[1, 1]).expect("fixture catalog");
    let tensors = vec![
        tensor(vec![0.1, 0.9, 0.2], 1, 3),
        tensor(vec![0.3, 0.4, 0.05], 1, 3),
    ];
    (catalog, tensors)
}

/// A rank-2 target and a rank-1 target over three candidates.
///
/// The rank-2 maximum 0.95 sits at (1, 2), so candidates 1 and 2 are
/// consumed first and the rank-1 target falls back to candidate 0 (0.4).
pub fn mixed_arity_event() -> (TargetCatalog, Vec<ScoreTensor<f32>>) {
    let catalog = TargetCatalog::from_arities(&[2, 1]).expect("fixture catalog");
    let rank2 = vec![0.10, 0.20, 0.15, 0.05, 0.30, 0.95, 0.25, 0.40, 0.35];
    let tensors = vec![tensor(rank2, 2, 3), tensor(vec![0.4, 0.6, 0.3], 1, 3)];
    (catalog, tensors)
}

/// A two-event batch of rank-1 target pairs over three candidates.
///
/// Returns per-target batch buffers (events concatenated). Event 0 resolves
/// targets to candidates 1 and 0; event 1, with reversed preferences, to
/// candidates 0 and 2.
pub fn batch_of_rank1_pairs() -> (TargetCatalog, Vec<Vec<f32>>) {
    let catalog = TargetCatalog::from_arities(&[1, 1]).expect("fixture catalog");
    let target_a = vec![
        0.1, 0.9, 0.2, // event 0
        0.8, 0.1, 0.2, // event 1
    ];
    let target_b = vec![
        0.3, 0.4, 0.05, // event 0
        0.5, 0.6, 0.7, // event 1
    ];
    (catalog, vec![target_a, target_b])
}

/// A catalog with one target per arity in `arities`, plus fully invalid
/// tensors for it. Useful for no-candidate termination tests.
pub fn all_invalid_event(arities: &[usize], extent: usize) -> Result<(TargetCatalog, Vec<ScoreTensor<f32>>)> {
    let catalog = TargetCatalog::from_arities(arities)?;
    let tensors = arities
        .iter()
        .map(|&arity| ScoreTensor::neg_infinity(arity, extent))
        .collect();
    Ok((catalog, tensors))
}
