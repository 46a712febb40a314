//! HTTP handlers for entries and authentication.

pub mod auth;
pub mod entries;
