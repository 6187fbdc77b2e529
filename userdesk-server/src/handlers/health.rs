use axum::{Json, extract::State};
use tracing::warn;
use userdesk_core::ApiEnvelope;

use crate::{
    AppState,
    errors::{AppError, AppResult},
};

pub async fn health_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiEnvelope<()>>> {
    state.users().ping().await.map_err(|err| {
        warn!(error = %err, "health check failed");
        AppError::service_unavailable(format!("database unavailable: {}", err))
    })?;

    Ok(Json(ApiEnvelope::message("ok")))
}
