use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;
use userdesk_core::api_routes;

use crate::{
    AppState,
    handlers::{
        assets::index_handler, health::health_handler, method_not_allowed,
        user_actions::user_action_handler, users::list_users_handler,
    },
    infra::config::CorsConfig,
};

/// API routes without middleware.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            api_routes::USER_ACTION,
            post(user_action_handler).fallback(method_not_allowed),
        )
        .route(
            api_routes::USERS,
            get(list_users_handler).fallback(method_not_allowed),
        )
        .route(
            api_routes::USERS_ALIAS,
            get(list_users_handler).fallback(method_not_allowed),
        )
}

pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.is_wildcard_included() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Full application: page, health, API, optional static directory, then
/// CORS (outermost) and request tracing.
pub fn create_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route(api_routes::INDEX, get(index_handler))
        .route(api_routes::HEALTH, get(health_handler))
        .merge(create_api_router());

    if let Some(dir) = state.config().static_dir.clone() {
        app = app.fallback_service(ServeDir::new(dir));
    }

    let cors = cors_layer(&state.config().cors);
    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
