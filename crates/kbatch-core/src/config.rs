//! Batching configuration.

use serde::{Deserialize, Serialize};

/// Default upper bound on the number of batches produced.
pub const DEFAULT_MAX_BATCHES: usize = 5;

/// Default minimum number of sentences a batch should hold after repair.
pub const DEFAULT_MIN_SENTENCES_PER_BATCH: usize = 4;

/// Default input size below which clustering is skipped entirely.
pub const DEFAULT_MIN_SENTENCES_REQUIRED: usize = 10;

/// Default cap on k-means refinement iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Knobs controlling the batching pass.
///
/// Fields fall back independently, so a JSON options object may override any
/// subset:
///
/// ```
/// use kbatch_core::BatchConfig;
///
/// let config: BatchConfig = serde_json::from_str(r#"{"maxBatches": 3}"#).unwrap();
/// assert_eq!(config.max_batches, 3);
/// assert_eq!(config.min_sentences_per_batch, 4);
/// ```
///
/// No cross-field validation is performed; degenerate values (zeroes, a
/// minimum larger than the input) are absorbed by the clamping logic in the
/// batcher rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchConfig {
    /// Upper bound on the number of clusters, and therefore batches.
    pub max_batches: usize,
    /// Batches smaller than this are merged into their neighbors after
    /// clustering; `0` disables merging.
    pub min_sentences_per_batch: usize,
    /// Inputs shorter than this are returned as a single batch untouched.
    pub min_sentences_required: usize,
    /// Iteration cap for the refinement loop, guarding against assignments
    /// that oscillate between equidistant centroids and never settle.
    pub max_iterations: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_batches: DEFAULT_MAX_BATCHES,
            min_sentences_per_batch: DEFAULT_MIN_SENTENCES_PER_BATCH,
            min_sentences_required: DEFAULT_MIN_SENTENCES_REQUIRED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
