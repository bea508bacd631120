//! Batch-parallel extraction driver.
//!
//! Events are fully independent: each task deep-copies its per-event tensor
//! slices, runs the extraction loop on the private copies, and its results
//! are scattered into the preallocated batch output. Caller-owned input
//! buffers are never mutated.

use std::fmt::Debug;

use num_traits::Float;
use rayon::prelude::*;

use matchforge_config::{ConfigError, EngineConfig, ThreadCount};
use matchforge_core::{
    EventAssignment, MatchForgeError, Result, ScoreTensor, TargetCatalog, UNUSED_SLOT,
};

use crate::extract::run_extraction;

/// A batch of per-target score buffers awaiting extraction.
///
/// Target `t`'s buffer is logically shaped `(batch_size, extent^arity(t))`,
/// stored flat and row-major: event `b`'s scores occupy the `b`-th chunk of
/// `extent^arity(t)` cells. `extent` is the maximum candidate count across
/// the batch; callers pre-mask unused trailing cells to negative infinity.
#[derive(Debug)]
pub struct BatchScores<'a, F> {
    catalog: &'a TargetCatalog,
    extent: usize,
    batch_size: usize,
    buffers: Vec<&'a [F]>,
}

impl<'a, F: Float> BatchScores<'a, F> {
    /// Wraps per-target flat buffers for batch extraction.
    ///
    /// # Errors
    ///
    /// Returns an error when the buffer count does not match the catalog,
    /// the extent is zero, or any buffer's length is not exactly
    /// `batch_size * extent^arity(t)`. Shape violations are fatal and are
    /// rejected before any extraction begins.
    pub fn new(
        catalog: &'a TargetCatalog,
        extent: usize,
        batch_size: usize,
        buffers: Vec<&'a [F]>,
    ) -> Result<Self> {
        if extent == 0 {
            return Err(MatchForgeError::InvalidExtent);
        }
        if buffers.len() != catalog.len() {
            return Err(MatchForgeError::TargetCountMismatch {
                expected: catalog.len(),
                actual: buffers.len(),
            });
        }
        for (target, buffer) in buffers.iter().enumerate() {
            let cells_per_event = extent.pow(catalog.arity(target) as u32);
            let expected = batch_size * cells_per_event;
            if buffer.len() != expected {
                return Err(MatchForgeError::ShapeMismatch {
                    target,
                    expected,
                    actual: buffer.len(),
                });
            }
        }
        Ok(BatchScores {
            catalog,
            extent,
            batch_size,
            buffers,
        })
    }

    /// The target catalog these scores belong to.
    pub fn catalog(&self) -> &TargetCatalog {
        self.catalog
    }

    /// Candidate count per axis.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Number of events in the batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Deep-copies event `b`'s slice of every target buffer into owned
    /// tensors the extraction loop may mutate.
    fn event_tensors(&self, b: usize) -> Vec<ScoreTensor<F>> {
        self.buffers
            .iter()
            .enumerate()
            .map(|(target, buffer)| {
                let cells = self.extent.pow(self.catalog.arity(target) as u32);
                let slice = &buffer[b * cells..(b + 1) * cells];
                // Validated at construction, so from_flat cannot fail here.
                ScoreTensor::from_flat(slice.to_vec(), self.catalog.arity(target), self.extent)
                    .expect("validated shape")
            })
            .collect()
    }
}

/// The assembled result of a batch extraction.
///
/// Per target: an assignment array and a weight array, each logically shaped
/// `(batch_size, max_arity)`. Trimmed accessors narrow a row to the target's
/// own arity at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult<F> {
    arities: Vec<usize>,
    max_arity: usize,
    batch_size: usize,
    slots: Vec<Vec<i64>>,
    weights: Vec<Vec<F>>,
}

impl<F: Float> BatchResult<F> {
    fn new(catalog: &TargetCatalog, batch_size: usize) -> Self {
        let max_arity = catalog.max_arity();
        BatchResult {
            arities: catalog.iter().map(|t| t.arity()).collect(),
            max_arity,
            batch_size,
            slots: vec![vec![UNUSED_SLOT; batch_size * max_arity]; catalog.len()],
            weights: vec![vec![F::neg_infinity(); batch_size * max_arity]; catalog.len()],
        }
    }

    fn scatter(&mut self, b: usize, assignment: &EventAssignment<F>) {
        for target in 0..self.arities.len() {
            let start = b * self.max_arity;
            self.slots[target][start..start + self.max_arity]
                .copy_from_slice(assignment.slot_row(target));
            self.weights[target][start..start + self.max_arity]
                .copy_from_slice(assignment.weight_row(target));
        }
    }

    /// Number of events.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of targets.
    pub fn num_targets(&self) -> usize {
        self.arities.len()
    }

    /// Row width of the padded arrays.
    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    /// Target `t`'s full assignment array, `(batch_size, max_arity)` flat.
    pub fn assignments(&self, t: usize) -> &[i64] {
        &self.slots[t]
    }

    /// Target `t`'s full weight array, `(batch_size, max_arity)` flat.
    pub fn weights(&self, t: usize) -> &[F] {
        &self.weights[t]
    }

    /// Event `b`'s padded assignment row for target `t`.
    pub fn assignment_row(&self, t: usize, b: usize) -> &[i64] {
        let start = b * self.max_arity;
        &self.slots[t][start..start + self.max_arity]
    }

    /// Event `b`'s padded weight row for target `t`.
    pub fn weight_row(&self, t: usize, b: usize) -> &[F] {
        let start = b * self.max_arity;
        &self.weights[t][start..start + self.max_arity]
    }

    /// Event `b`'s assignment row trimmed to target `t`'s own arity.
    pub fn trimmed_assignment_row(&self, t: usize, b: usize) -> &[i64] {
        &self.assignment_row(t, b)[..self.arities[t]]
    }

    /// Event `b`'s weight row trimmed to target `t`'s own arity.
    pub fn trimmed_weight_row(&self, t: usize, b: usize) -> &[F] {
        &self.weight_row(t, b)[..self.arities[t]]
    }

    /// Whether target `t` resolved in event `b`.
    pub fn is_resolved(&self, t: usize, b: usize) -> bool {
        self.assignment_row(t, b)[0] >= 0
    }
}

/// Runs extraction loops across a batch, one independent task per event.
#[derive(Debug)]
pub struct BatchExtractor {
    sequential: bool,
    pool: Option<rayon::ThreadPool>,
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchExtractor {
    /// Creates an extractor using the global rayon pool.
    pub fn new() -> Self {
        BatchExtractor {
            sequential: false,
            pool: None,
        }
    }

    /// Creates an extractor from an engine configuration.
    ///
    /// A fixed thread count gets its own dedicated pool; `Auto` uses the
    /// global pool; `None` runs events sequentially on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration or a pool that fails
    /// to build.
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e: ConfigError| MatchForgeError::Config(e.to_string()))?;

        match config.thread_count {
            ThreadCount::Auto => Ok(Self::new()),
            ThreadCount::None => Ok(BatchExtractor {
                sequential: true,
                pool: None,
            }),
            ThreadCount::Count(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| MatchForgeError::Config(e.to_string()))?;
                Ok(BatchExtractor {
                    sequential: false,
                    pool: Some(pool),
                })
            }
        }
    }

    /// Extracts assignments for every event in the batch.
    ///
    /// Events never share mutable state: each task works on its own deep
    /// copy and the joined results are scattered into disjoint output rows.
    pub fn extract<F>(&self, scores: &BatchScores<'_, F>) -> BatchResult<F>
    where
        F: Float + Debug + Send + Sync,
    {
        tracing::debug!(
            batch_size = scores.batch_size(),
            targets = scores.catalog().len(),
            extent = scores.extent(),
            "extracting batch"
        );

        let events = if self.sequential {
            (0..scores.batch_size())
                .map(|b| Self::extract_one(scores, b))
                .collect::<Vec<_>>()
        } else {
            match &self.pool {
                Some(pool) => pool.install(|| Self::extract_all_parallel(scores)),
                None => Self::extract_all_parallel(scores),
            }
        };

        let mut result = BatchResult::new(scores.catalog(), scores.batch_size());
        for (b, assignment) in events.iter().enumerate() {
            result.scatter(b, assignment);
        }
        result
    }

    fn extract_all_parallel<F>(scores: &BatchScores<'_, F>) -> Vec<EventAssignment<F>>
    where
        F: Float + Debug + Send + Sync,
    {
        (0..scores.batch_size())
            .into_par_iter()
            .map(|b| Self::extract_one(scores, b))
            .collect()
    }

    fn extract_one<F>(scores: &BatchScores<'_, F>, b: usize) -> EventAssignment<F>
    where
        F: Float + Debug,
    {
        let mut tensors = scores.event_tensors(b);
        run_extraction(&mut tensors, scores.catalog())
    }
}

/// One-call convenience: validates, extracts with the default extractor.
///
/// # Errors
///
/// Propagates the shape validation errors of [`BatchScores::new`].
pub fn extract_batch<F>(
    catalog: &TargetCatalog,
    extent: usize,
    batch_size: usize,
    buffers: Vec<&[F]>,
) -> Result<BatchResult<F>>
where
    F: Float + Debug + Send + Sync,
{
    let scores = BatchScores::new(catalog, extent, batch_size, buffers)?;
    Ok(BatchExtractor::new().extract(&scores))
}
