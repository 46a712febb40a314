//! Journal route table: (method, path) -> handler, built once at startup.

use crate::handlers::auth::{login, login_form, logout};
use crate::handlers::entries::{create, edit_form, list, read, update};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn journal_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout).post(logout))
        .route("/add", post(create))
        .route("/post/:id", get(read))
        .route("/edit/:id", get(edit_form).post(update))
        .route("/update/:id", post(update))
        .with_state(state)
}
