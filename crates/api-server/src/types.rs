//! API request and response types

use kbatch_core::{Batch, BatchAnalysis, BatchConfig};
use serde::{Deserialize, Serialize};

/// Request body for `/api/parse-sentences`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Raw text to split into sentences
    #[serde(default)]
    pub text: String,
}

/// Response body for `/api/parse-sentences`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Sentences in document order
    pub sentences: Vec<String>,
}

/// Request body for `/api/k-batch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Sentences to group by length
    #[serde(default)]
    pub sentences: Option<Vec<String>>,
    /// Batching knobs; absent or null means defaults, and absent fields
    /// inside the object fall back per field
    #[serde(default)]
    pub options: Option<BatchConfig>,
}

/// Response body for `/api/k-batch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Batches in output order, each sorted longest-first
    pub batches: Vec<Batch>,
}

/// Request body for `/api/analyze-batches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Batches to compute statistics for
    #[serde(default)]
    pub batches: Option<Vec<Batch>>,
}

/// Response body for `/api/analyze-batches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Per-batch statistics plus the overall batch count
    pub analysis: BatchAnalysis,
}

/// Error body returned with 4xx/5xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}
