use axum::{extract::State, Json};
use service_core::error::AppError;

use super::extract::JsonBody;
use crate::dtos::{DraftRequest, DraftResult};
use crate::services::{prompts, request_completion};
use crate::startup::AppState;

/// `POST /api/draft`: write a ready-to-send celebration message for one win.
#[tracing::instrument(skip_all)]
pub async fn draft_celebration(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DraftRequest>,
) -> Result<Json<DraftResult>, AppError> {
    request.validated_win()?;

    let chat = prompts::draft_request(&state.config.routellm.model, &request);
    let completion = request_completion(state.provider.as_ref(), "draft", &chat).await?;

    let draft = completion
        .first_content()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(Json(DraftResult { draft }))
}
