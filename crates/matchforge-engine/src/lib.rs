//! MatchForge Extraction Engine
//!
//! This crate turns per-target score tensors into globally consistent,
//! mutually exclusive assignments:
//! - Masking engine: removes a consumed candidate from every tensor
//! - Greedy selector: finds the best remaining combination across targets
//! - Extraction loop: resolves one event, one target per iteration
//! - Batch driver: one independent extraction task per event, in parallel

pub mod batch;
pub mod extract;
pub mod mask;
pub mod select;

pub use batch::{extract_batch, BatchExtractor, BatchResult, BatchScores};
pub use extract::extract_event;
pub use mask::mask_candidate;
pub use select::{best_combination, Selection};
