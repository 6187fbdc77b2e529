use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use userdesk_core::ApiEnvelope;

use crate::{AppState, errors::AppResult};

/// `POST /api/user-action`
///
/// The body is parsed as JSON whatever `Content-Type` says, so the legacy
/// front-end keeps working. Bodies over axum's default limit are refused
/// with a 413 envelope.
pub async fn user_action_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<ApiEnvelope<()>>> {
    let body = body?;
    let outcome = state.dispatcher().dispatch_body(&body).await?;
    Ok(Json(ApiEnvelope::message(outcome.message())))
}
