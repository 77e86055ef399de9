//! Route tables and the assembled application router.

mod common;
mod student;

pub use common::{common_routes, common_routes_with_ready};
pub use student::student_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: student routes, `/hello`, health/readiness/version, with
/// request tracing and a body size cap of `body_limit` bytes.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(student_routes(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
