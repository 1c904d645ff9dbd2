//! HTTP request handlers for API endpoints

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, warn};

use crate::sentences::split_sentences;
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, BatchRequest, BatchResponse, ErrorResponse, HealthResponse,
    ParseRequest, ParseResponse,
};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Split raw text into sentences
pub async fn parse_sentences(
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(bad_request_from_rejection)?;

    if request.text.is_empty() {
        return Err(bad_request("Text is required"));
    }

    let sentences = split_sentences(&request.text);
    info!("Parsed {} sentences from input text", sentences.len());

    Ok(Json(ParseResponse { sentences }))
}

/// Group sentences into length-based batches
pub async fn k_batch(
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(bad_request_from_rejection)?;

    let Some(sentences) = request.sentences else {
        return Err(bad_request("Valid sentences array is required"));
    };

    let options = request.options.unwrap_or_default();
    let batches = kbatch_core::batch_sentences(&sentences, &options);
    info!(
        "Batched {} sentences into {} batches",
        sentences.len(),
        batches.len()
    );

    Ok(Json(BatchResponse { batches }))
}

/// Compute per-batch statistics
pub async fn analyze_batches(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(bad_request_from_rejection)?;

    let Some(batches) = request.batches else {
        return Err(bad_request("Valid batches array is required"));
    };

    let analysis = kbatch_core::analyze_batches(&batches).map_err(|err| {
        warn!("Rejected analysis request: {}", err);
        bad_request(err.to_string())
    })?;
    info!("Analyzed {} batches", analysis.total_batches);

    Ok(Json(AnalyzeResponse { analysis }))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn bad_request_from_rejection(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    bad_request(rejection.body_text())
}
