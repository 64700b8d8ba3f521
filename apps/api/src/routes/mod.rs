pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::applications::handlers as applications;
use crate::leads::handlers as leads;
use crate::state::AppState;

/// Room for the text parts and multipart framing on top of the resume itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.resumes.max_bytes() + MULTIPART_OVERHEAD_BYTES;

    let api = Router::new()
        .route(
            "/leads",
            post(leads::handle_create_lead).get(leads::handle_list_leads),
        )
        .route(
            "/applications",
            post(applications::handle_create_application)
                .get(applications::handle_list_applications)
                .layer(DefaultBodyLimit::max(upload_limit)),
        );

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api/v1", api)
        .with_state(state)
}

/// Allows the configured origins with credentials; methods and headers are
/// mirrored from the preflight request.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
