//! Per-batch descriptive statistics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Batch;

/// Error cases for batch analysis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Statistics are undefined for a batch with no sentences.
    #[error("batch {batch_number} is empty; statistics are undefined for empty batches")]
    EmptyBatch {
        /// 1-based position of the offending batch.
        batch_number: usize,
    },
}

/// Descriptive statistics for one batch. Lengths are counted in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// 1-based position of the batch in the analyzed sequence.
    pub batch_number: usize,
    pub sentence_count: usize,
    pub longest_sentence: usize,
    pub shortest_sentence: usize,
    /// Mean sentence length, rounded to two decimals.
    pub average_sentence_length: f64,
    /// Population standard deviation of sentence length, rounded to two
    /// decimals. Deviations are measured from the already-rounded mean.
    pub standard_deviation: f64,
}

/// Statistics for a whole batch sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalysis {
    pub total_batches: usize,
    pub batches: Vec<BatchStats>,
}

/// Computes descriptive statistics for every batch.
///
/// Batches are numbered from 1 in the result. The standard deviation is the
/// population form (dividing by the count, not count - 1) and is computed
/// against the already-rounded mean, then rounded to two decimals itself.
///
/// # Errors
///
/// Returns [`AnalyzeError::EmptyBatch`] if any batch holds no sentences;
/// min/max/mean are undefined there.
///
/// # Example
///
/// ```
/// use kbatch_core::analyze_batches;
///
/// let batches = vec![vec![
///     "x".repeat(10),
///     "x".repeat(20),
///     "x".repeat(30),
///     "x".repeat(40),
/// ]];
///
/// let analysis = analyze_batches(&batches).unwrap();
/// assert_eq!(analysis.total_batches, 1);
/// assert_eq!(analysis.batches[0].average_sentence_length, 25.0);
/// assert_eq!(analysis.batches[0].standard_deviation, 11.18);
/// ```
pub fn analyze_batches(batches: &[Batch]) -> Result<BatchAnalysis, AnalyzeError> {
    let mut stats = Vec::with_capacity(batches.len());
    for (i, batch) in batches.iter().enumerate() {
        stats.push(batch_stats(batch, i + 1)?);
    }

    Ok(BatchAnalysis {
        total_batches: batches.len(),
        batches: stats,
    })
}

fn batch_stats(batch: &Batch, batch_number: usize) -> Result<BatchStats, AnalyzeError> {
    if batch.is_empty() {
        return Err(AnalyzeError::EmptyBatch { batch_number });
    }

    let lengths: Vec<usize> = batch.iter().map(|s| s.chars().count()).collect();
    let count = lengths.len();

    let mut longest = 0;
    let mut shortest = usize::MAX;
    let mut total = 0;
    for &length in &lengths {
        longest = longest.max(length);
        shortest = shortest.min(length);
        total += length;
    }

    let average = round2(total as f64 / count as f64);
    // Deviations are taken from the rounded mean, not the raw one.
    let variance = lengths
        .iter()
        .map(|&length| (length as f64 - average).powi(2))
        .sum::<f64>()
        / count as f64;
    let standard_deviation = round2(variance.sqrt());

    Ok(BatchStats {
        batch_number,
        sentence_count: count,
        longest_sentence: longest,
        shortest_sentence: shortest,
        average_sentence_length: average,
        standard_deviation,
    })
}

/// Round to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
