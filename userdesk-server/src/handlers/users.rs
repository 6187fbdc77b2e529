use axum::{Json, extract::State};
use tracing::{error, info};
use userdesk_core::{ApiEnvelope, UserRecord};

use crate::{
    AppState,
    errors::{AppError, AppResult},
};

/// `GET /api/usuarios`: every account ordered by id, password excluded.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiEnvelope<Vec<UserRecord>>>> {
    let users = state.users().list_users().await.map_err(|err| {
        error!(error = %err, "failed to list users");
        AppError::internal(format!("Error fetching users: {}", err))
    })?;

    info!("Retrieved {} users", users.len());
    Ok(Json(ApiEnvelope::with_data("Users listed successfully", users)))
}
