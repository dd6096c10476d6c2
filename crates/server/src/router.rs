use super::{handlers, state::AppState};
use axum::{routing::get, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/version", get(handlers::version_handler))
        .route("/latest_release", get(handlers::latest_release_handler))
        .route("/metadata", get(handlers::metadata_handler))
        .with_state(app_state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Allows any origin, method and header, with credentials.
///
/// Credentials cannot be combined with wildcards, so the request's own values
/// are mirrored back instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
