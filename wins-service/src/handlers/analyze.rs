use axum::{extract::State, Json};
use service_core::error::AppError;

use super::extract::JsonBody;
use crate::dtos::{AnalyzeResult, CheckInInput};
use crate::services::{parse_analysis, prompts, request_completion, AnalysisOutcome};
use crate::startup::AppState;

/// `POST /api/analyze`: turn a check-in into a summary and a list of wins.
///
/// Never rejects missing fields. When the model's reply is not a JSON
/// object, the 500 body carries the raw reply for debugging.
#[tracing::instrument(skip_all)]
pub async fn analyze_checkin(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CheckInInput>,
) -> Result<Json<AnalyzeResult>, AppError> {
    let request = prompts::analyze_request(&state.config.routellm.model, &input)
        .map_err(|e| AppError::InternalError(e.into()))?;

    let completion = request_completion(state.provider.as_ref(), "analyze", &request).await?;

    match parse_analysis(completion.first_content()) {
        AnalysisOutcome::Parsed(result) => Ok(Json(result)),
        AnalysisOutcome::Malformed { raw } => {
            tracing::warn!(content_len = raw.len(), "Model did not return valid JSON");
            Err(AppError::InternalError(anyhow::anyhow!(
                "Model did not return valid JSON:\n{}",
                raw
            )))
        }
    }
}
