//! Routers and the assembled application.

mod common;
mod journal;
pub use common::common_routes;
pub use journal::journal_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body (form posts carry whole entries).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: journal routes, operational routes, tracing and body limit.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(journal_routes(state.clone()))
        .merge(common_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
