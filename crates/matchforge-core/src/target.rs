//! Target catalog: the reconstruction targets competing for one candidate pool.

use crate::error::{MatchForgeError, Result};

/// A single reconstruction target: a fixed number of slots to fill with
/// distinct candidates, plus a display name used in logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    name: String,
    arity: usize,
}

impl TargetSpec {
    /// Creates a target with the given name and slot count.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        TargetSpec {
            name: name.into(),
            arity,
        }
    }

    /// Display name of this target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots (tensor rank for this target's scores).
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// An ordered, immutable collection of targets.
///
/// Target index `t` in all engine APIs refers to position `t` in this
/// catalog. Arities may differ across targets but are fixed for the lifetime
/// of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCatalog {
    targets: Vec<TargetSpec>,
    max_arity: usize,
}

impl TargetCatalog {
    /// Creates a catalog from explicit target specs.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or any target has arity 0.
    pub fn new(targets: Vec<TargetSpec>) -> Result<Self> {
        if targets.is_empty() {
            return Err(MatchForgeError::Catalog(
                "catalog must contain at least one target".to_string(),
            ));
        }
        for (index, target) in targets.iter().enumerate() {
            if target.arity == 0 {
                return Err(MatchForgeError::Catalog(format!(
                    "target {index} ({}) has arity 0; every target needs at least one slot",
                    target.name
                )));
            }
        }
        let max_arity = targets.iter().map(|t| t.arity).max().unwrap_or(0);
        Ok(TargetCatalog { targets, max_arity })
    }

    /// Creates a catalog from an arity vector, with generated names.
    pub fn from_arities(arities: &[usize]) -> Result<Self> {
        let targets = arities
            .iter()
            .enumerate()
            .map(|(index, &arity)| TargetSpec::new(format!("target{index}"), arity))
            .collect();
        Self::new(targets)
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always false; construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The largest arity across all targets; result rows are padded to this.
    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    /// Arity of target `t`.
    pub fn arity(&self, t: usize) -> usize {
        self.targets[t].arity
    }

    /// The spec for target `t`.
    pub fn get(&self, t: usize) -> &TargetSpec {
        &self.targets[t]
    }

    /// Iterates over targets in index order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetSpec> {
        self.targets.iter()
    }
}
