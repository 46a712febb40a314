//! Entry input validation. A draft only exists once its fields pass.

use crate::error::AppError;

/// Matches the `VARCHAR(127)` column.
pub const TITLE_MAX_CHARS: usize = 127;

/// Validated title/text pair ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDraft {
    title: String,
    text: String,
}

impl EntryDraft {
    /// Both fields are required and must contain something other than whitespace.
    pub fn new(title: Option<String>, text: Option<String>) -> Result<Self, AppError> {
        let title = required("title", title)?;
        let text = required("text", text)?;
        let chars = title.chars().count();
        if chars > TITLE_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "title must be at most {} characters",
                TITLE_MAX_CHARS
            )));
        }
        Ok(Self { title, text })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if v.contains('\0') => Err(AppError::Validation(format!(
            "{} must not contain NUL characters",
            field
        ))),
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}
