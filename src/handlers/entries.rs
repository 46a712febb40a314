//! Entry handlers: public list and view, admin-only create and edit.

use crate::error::AppError;
use crate::extractors::{AdminIdentity, CurrentIdentity};
use crate::response::{found, success_many, success_one_ok, EntryView};
use crate::service::{EntryDraft, EntryStore};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Path ids are plain digits that fit a `SERIAL`. Anything else cannot name an entry.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound(format!("entry {}", id_str)));
    }
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("entry {}", id_str)))
}

/// GET / -> every entry, newest first, with text rendered.
pub async fn list(
    State(state): State<AppState>,
    identity: CurrentIdentity,
) -> Result<impl IntoResponse, AppError> {
    let entries = state
        .transactions
        .run(|conn| Box::pin(EntryStore::list(conn)))
        .await?;
    let views: Vec<EntryView> = entries.into_iter().map(EntryView::from).collect();
    Ok(success_many(views, identity.is_admin(&state)))
}

/// GET /post/:id -> one entry with text rendered.
pub async fn read(
    State(state): State<AppState>,
    identity: CurrentIdentity,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let entry = state
        .transactions
        .run(move |conn| Box::pin(EntryStore::get(conn, id)))
        .await?;
    Ok(success_one_ok(EntryView::from(entry), identity.is_admin(&state)))
}

/// POST /add -> create, then back to the list.
pub async fn create(
    State(state): State<AppState>,
    AdminIdentity(_admin): AdminIdentity,
    Form(form): Form<EntryForm>,
) -> Result<Response, AppError> {
    let draft = EntryDraft::new(form.title, form.text)?;
    state
        .transactions
        .run(move |conn| Box::pin(async move { EntryStore::create(conn, &draft).await }))
        .await?;
    Ok(found("/"))
}

/// GET /edit/:id -> the raw markdown entry for editing.
pub async fn edit_form(
    State(state): State<AppState>,
    AdminIdentity(_admin): AdminIdentity,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let entry = state
        .transactions
        .run(move |conn| Box::pin(EntryStore::get(conn, id)))
        .await?;
    Ok(success_one_ok(entry, true))
}

/// POST /edit/:id and POST /update/:id -> overwrite, then back to the list.
pub async fn update(
    State(state): State<AppState>,
    AdminIdentity(_admin): AdminIdentity,
    Path(id_str): Path<String>,
    Form(form): Form<EntryForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let draft = EntryDraft::new(form.title, form.text)?;
    state
        .transactions
        .run(move |conn| Box::pin(async move { EntryStore::update(conn, id, &draft).await }))
        .await?;
    Ok(found("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_ids_parse() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("007").unwrap(), 7);
    }

    #[test]
    fn non_digit_ids_are_not_found() {
        for bad in ["", "abc", "-1", "+3", "1.5", " 1", "99999999999"] {
            assert!(
                matches!(parse_id(bad), Err(AppError::NotFound(_))),
                "{bad:?} should not parse"
            );
        }
    }
}
