mod health_handlers;
mod round_up_handlers;

pub use self::health_handlers::*;
pub use self::round_up_handlers::*;

use crate::app_state::AppState;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Sequential outbound calls one delivery can make: metadata token, secret access, balance,
/// transfer.
const MAX_SEQUENTIAL_CALLS: u32 = 4;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", post(round_up_handler))
        .route("/round-up", post(round_up_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}

/// Time a delivery may take when every outbound call is allowed `http_timeout`.
pub fn request_timeout(http_timeout: Duration) -> Duration {
    http_timeout * MAX_SEQUENTIAL_CALLS
}

/// The router with request tracing and a request timeout. A timed out delivery answers 500,
/// like any other processing failure.
pub fn app(app_state: AppState, request_timeout: Duration) -> Router {
    router(app_state).layer((
        TraceLayer::new_for_http(),
        // Graceful shutdown will wait for outstanding requests to complete. Add a timeout so
        // requests don't hang forever.
        TimeoutLayer::with_status_code(StatusCode::INTERNAL_SERVER_ERROR, request_timeout),
    ))
}
