//! Operational routes for process supervisors: liveness, entry storage readiness, build info.

use crate::service::EntryStore;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct BuildInfo {
    service: &'static str,
    version: &'static str,
}

const BUILD: BuildInfo = BuildInfo {
    service: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// The process is up. Never touches the database.
async fn live() -> Json<Probe> {
    Json(Probe {
        status: "ok",
        entries: None,
    })
}

/// 200 once the `entries` table answers a read inside a request transaction, 503 otherwise.
async fn ready(State(state): State<AppState>) -> Response {
    match state
        .transactions
        .run(|conn| Box::pin(EntryStore::reachable(conn)))
        .await
    {
        Ok(()) => Json(Probe {
            status: "ok",
            entries: Some("reachable"),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "entries table unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Probe {
                    status: "unavailable",
                    entries: Some("unreachable"),
                }),
            )
                .into_response()
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BUILD)
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .route("/version", get(build_info))
        .with_state(state)
}
