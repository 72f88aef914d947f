use crate::api::reports::{self, AppState};
use axum::http::{header, HeaderValue, Method};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Read-only JSON API; any origin may fetch it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/reports/visitors", get(reports::get_visitors))
        .route("/reports/totals", get(reports::get_totals))
        .route("/reports/pages", get(reports::get_pages))
        .route("/reports/referrers", get(reports::get_referrers))
        .route("/reports/browsers", get(reports::get_browsers))
        .route("/realtime/active-users", get(reports::get_active_users))
        .layer(cors);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(axum::middleware::map_response(add_security_headers))
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(60),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn add_security_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    response
}

/// GET /health: Simple health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
