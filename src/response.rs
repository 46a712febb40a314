//! Response envelopes and page view models. Markup is rendered by whatever consumes the JSON.

use crate::render::markdown_to_html;
use crate::service::Entry;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
    pub authenticated: bool,
}

#[derive(Serialize)]
pub struct PageMeta {
    pub authenticated: bool,
}

/// An entry with its markdown already rendered to HTML.
#[derive(Clone, Debug, Serialize)]
pub struct EntryView {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub created: NaiveDateTime,
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            text: markdown_to_html(&entry.text),
            created: entry.created,
        }
    }
}

/// Login form state: the submitted username is echoed back with any error.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LoginPage {
    pub error: String,
    pub username: String,
}

pub fn success_one_ok<T: Serialize>(
    data: T,
    authenticated: bool,
) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            data,
            meta: Some(PageMeta { authenticated }),
        }),
    )
}

pub fn success_many<T: Serialize>(
    data: Vec<T>,
    authenticated: bool,
) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount {
                count,
                authenticated,
            },
        }),
    )
}

/// `302 Found` to `location`.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
