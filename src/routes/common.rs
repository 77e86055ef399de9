//! Operational routes: `/hello`, `/health` and store readiness at `/ready`.

use crate::config::StoreKind;
use crate::handlers::hello::hello;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Liveness plus build identity.
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct StoreReadiness {
    ready: bool,
    store: StoreKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn health() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StoreReadiness>) {
    let store = state.students.store();
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StoreReadiness {
                ready: true,
                store: store.kind(),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(store = %store.kind(), error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StoreReadiness {
                    ready: false,
                    store: store.kind(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

/// Stateless routes: GET /hello, GET /health.
pub fn common_routes() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/health", get(health))
}

/// Stateless routes plus GET /ready against the student store.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
        .merge(common_routes())
}
