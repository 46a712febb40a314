//! Shared fixtures for router and database tests.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use learning_journal::config::{AuthSettings, DatabaseSettings, JournalConfig};
use learning_journal::store::{connect_options, connect_pool_lazy, pool_options};
use learning_journal::{app, apply_migrations, connect_pool, AppState};
use sqlx::PgPool;
use std::time::Duration;
use tower::ServiceExt;

pub const ADMIN: &str = "admin";
pub const PASSWORD: &str = "secret";

pub fn test_config(database_url: &str) -> JournalConfig {
    JournalConfig {
        debug: true,
        port: 0,
        database: DatabaseSettings {
            url: database_url.to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            statement_timeout: Duration::from_secs(5),
        },
        auth: AuthSettings {
            username: ADMIN.to_string(),
            password_hash: bcrypt::hash(PASSWORD, 4).expect("bcrypt hash"),
            auth_secret: "test-auth-secret".to_string(),
            session_secret: "test-session-secret".to_string(),
            ticket_timeout: None,
            secure_cookie: false,
        },
    }
}

/// State over a pool that never connects unless a handler needs the database.
pub fn offline_state() -> AppState {
    let mut config = test_config("postgres://journal@127.0.0.1:1/journal_offline");
    config.database.acquire_timeout = Duration::from_millis(300);
    let pool = connect_pool_lazy(&config.database).expect("lazy pool");
    AppState::new(pool, config).expect("state")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("request failed")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_form(uri: &str, form: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("request")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// `name=value` of the ticket cookie set by a response, ready for a Cookie header.
pub fn ticket_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with("auth_tkt="))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .next()
}

pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Log in through the router and return the ticket cookie.
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        post_form("/login", &[("username", ADMIN), ("password", PASSWORD)], None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    ticket_cookie(&response).expect("login sets ticket")
}

/// A private schema in the `DATABASE_URL` database with the journal tables applied.
pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
    url: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let config = test_config(&url);
        let schema = format!("journal_test_{}", uuid::Uuid::new_v4().simple());

        let admin = connect_pool(&config.database).await.expect("connect");
        sqlx::query(&format!("CREATE SCHEMA {}", schema))
            .execute(&admin)
            .await
            .expect("create schema");

        let opts = connect_options(&config.database)
            .expect("options")
            .options([("search_path", schema.as_str())]);
        let pool = pool_options(&config.database)
            .connect_with(opts)
            .await
            .expect("connect to test schema");
        apply_migrations(&pool).await.expect("migrations");

        Self {
            pool,
            admin,
            schema,
            url,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.pool.clone(), test_config(&self.url)).expect("state")
    }

    pub fn app(&self) -> Router {
        app(self.state())
    }

    pub async fn count(&self) -> i64 {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(&self.pool)
            .await
            .expect("count");
        n
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema");
    }
}
