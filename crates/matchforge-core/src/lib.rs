//! MatchForge Core - Data model for greedy assignment extraction
//!
//! This crate provides the fundamental types for MatchForge:
//! - Score tensors over variable-rank combination spaces
//! - The flat-index / multi-index combination codec
//! - Target catalogs describing what competes for candidates
//! - Assignment and weight rows for extraction results

pub mod assignment;
pub mod codec;
pub mod error;
pub mod target;
pub mod tensor;

pub use assignment::{EventAssignment, UNASSIGNED, UNUSED_SLOT};
pub use codec::{CombinationCodec, SlotIndices, INLINE_RANK};
pub use error::{MatchForgeError, Result};
pub use target::{TargetCatalog, TargetSpec};
pub use tensor::ScoreTensor;
