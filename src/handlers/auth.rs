//! Login and logout.

use crate::error::AppError;
use crate::response::{found, LoginPage, SuccessOne};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

/// Shown for any credential mismatch; never says which field was wrong.
pub const LOGIN_FAILED: &str = "Login Failed";

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn login_page(page: LoginPage) -> Response {
    (StatusCode::OK, Json(SuccessOne { data: page, meta: None })).into_response()
}

/// GET /login -> empty form.
pub async fn login_form() -> Response {
    login_page(LoginPage::default())
}

/// POST /login -> issue a ticket and redirect on success, otherwise re-render the form.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    let verifier = state.credentials.clone();
    let candidate = username.clone();
    let verified = tokio::task::spawn_blocking(move || verifier.verify(&candidate, &password))
        .await
        .map_err(|e| AppError::Internal(format!("credential check panicked: {}", e)))?;

    match verified {
        Ok(true) => {
            tracing::info!(username = %username, "login succeeded");
            let jar = state.sessions.issue(jar, &username);
            Ok((jar, found("/")).into_response())
        }
        Ok(false) => {
            tracing::warn!(username = %username, "login failed");
            Ok(login_page(LoginPage {
                error: LOGIN_FAILED.to_string(),
                username,
            }))
        }
        Err(AppError::Validation(message)) => Ok(login_page(LoginPage {
            error: message,
            username,
        })),
        Err(other) => Err(other),
    }
}

/// GET or POST /logout -> drop the ticket and go home.
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    (state.sessions.clear(jar), found("/")).into_response()
}
