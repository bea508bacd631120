//! MatchForge - Greedy Assignment Extraction
//!
//! A trained assignment model scores, for each reconstruction target, every
//! combination of candidates that could fill that target's slots. MatchForge
//! turns those per-target score tensors into one globally consistent,
//! mutually exclusive assignment per event: repeatedly commit the single
//! best remaining combination, then remove every combination reusing a
//! now-consumed candidate, independently for every event in a batch.
//!
//! # Example
//!
//! ```
//! use matchforge::{extract_batch, TargetCatalog};
//!
//! // Two single-slot targets competing for three candidates, one event.
//! let catalog = TargetCatalog::from_arities(&[1, 1]).unwrap();
//! let target_a = [0.1f32, 0.9, 0.2];
//! let target_b = [0.3f32, 0.4, 0.05];
//!
//! let result = extract_batch(&catalog, 3, 1, vec![&target_a[..], &target_b[..]]).unwrap();
//!
//! // Target A takes candidate 1; B falls back to candidate 0.
//! assert_eq!(result.assignment_row(0, 0), &[1]);
//! assert_eq!(result.assignment_row(1, 0), &[0]);
//! assert_eq!(result.weight_row(0, 0), &[0.9]);
//! ```

// Data model
pub use matchforge_core::{
    CombinationCodec, EventAssignment, MatchForgeError, Result, ScoreTensor, SlotIndices,
    TargetCatalog, TargetSpec, UNUSED_SLOT,
};

// Extraction engine
pub use matchforge_engine::{
    best_combination, extract_batch, extract_event, mask_candidate, BatchExtractor, BatchResult,
    BatchScores, Selection,
};

// Configuration
pub use matchforge_config::{ConfigError, EngineConfig, ThreadCount};
