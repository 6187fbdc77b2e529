pub mod assets;
pub mod health;
pub mod user_actions;
pub mod users;

use crate::errors::AppError;

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
