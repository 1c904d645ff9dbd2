//! kbatch-core: length-based sentence batching.
//!
//! Groups sentences into batches of roughly similar character length using
//! bounded 1-D k-means over the length distribution, then repairs undersized
//! batches with a greedy merge pass. A companion analyzer computes per-batch
//! descriptive statistics (count, min, max, mean, population standard
//! deviation).
//!
//! The crate is pure computation: no I/O, no shared state, every call
//! independent. The only randomness is the reseeding of empty clusters, and
//! it can be injected for reproducible runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use kbatch_core::{analyze_batches, batch_sentences, BatchConfig};
//!
//! let sentences: Vec<String> = (0..12)
//!     .map(|i| "word ".repeat([1, 10, 20][i / 4]).trim_end().to_string())
//!     .collect();
//!
//! let batches = batch_sentences(&sentences, &BatchConfig::default());
//! assert_eq!(batches.len(), 3);
//!
//! let analysis = analyze_batches(&batches).unwrap();
//! assert_eq!(analysis.total_batches, 3);
//! ```

pub mod analyzer;
pub mod batcher;
pub mod config;

pub use analyzer::{analyze_batches, AnalyzeError, BatchAnalysis, BatchStats};
pub use batcher::{batch_sentences, batch_sentences_with_rng};
pub use config::{
    BatchConfig, DEFAULT_MAX_BATCHES, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_SENTENCES_PER_BATCH,
    DEFAULT_MIN_SENTENCES_REQUIRED,
};

/// A group of sentences emitted together, ordered longest-first internally.
pub type Batch = Vec<String>;
