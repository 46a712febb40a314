//! Identity ticket carried in a signed cookie.
//!
//! The cookie value is `<mac>.<issued>.<identity>`: the identity is base64url, `issued` is
//! Unix seconds, and the MAC is HMAC-SHA512 under the auth secret over `<issued>.<identity>`.
//! The cookie itself lives in a [`SignedCookieJar`] keyed from the session secret.
//! Anything that fails to verify reads as "no identity".

use crate::config::AuthSettings;
use crate::error::ConfigError;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha512};
use std::time::Duration;

type HmacSha512 = Hmac<Sha512>;

pub const AUTH_COOKIE: &str = "auth_tkt";

pub struct SessionManager {
    cookie_key: Key,
    ticket_mac: HmacSha512,
    timeout: Option<Duration>,
    secure: bool,
}

impl SessionManager {
    pub fn new(settings: &AuthSettings) -> Result<Self, ConfigError> {
        let ticket_mac = HmacSha512::new_from_slice(settings.auth_secret.as_bytes())
            .map_err(|e| ConfigError::Validation(format!("JOURNAL_AUTH_SECRET: {}", e)))?;
        // Key::from needs at least 64 bytes; a SHA-512 digest is exactly that.
        let digest = Sha512::digest(settings.session_secret.as_bytes());
        Ok(Self {
            cookie_key: Key::from(digest.as_slice()),
            ticket_mac,
            timeout: settings.ticket_timeout,
            secure: settings.secure_cookie,
        })
    }

    /// Signing key for the cookie jar extractor.
    pub fn cookie_key(&self) -> &Key {
        &self.cookie_key
    }

    /// Add a fresh ticket for `identity` to the outgoing jar.
    pub fn issue(&self, jar: SignedCookieJar, identity: &str) -> SignedCookieJar {
        let ticket = self.seal(identity, Utc::now().timestamp());
        let mut cookie = Cookie::build(Cookie::new(AUTH_COOKIE, ticket))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        if let Some(timeout) = self.timeout {
            let secs = i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX);
            cookie = cookie.max_age(time::Duration::seconds(secs));
        }
        jar.add(cookie.build())
    }

    /// Emit a removal cookie for the ticket.
    pub fn clear(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(
            Cookie::build(Cookie::new(AUTH_COOKIE, ""))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build(),
        )
    }

    /// Identity asserted by a valid, unexpired ticket in `jar`.
    pub fn current_identity(&self, jar: &SignedCookieJar) -> Option<String> {
        let cookie = jar.get(AUTH_COOKIE)?;
        self.open(cookie.value(), Utc::now().timestamp())
    }

    fn seal(&self, identity: &str, issued: i64) -> String {
        let payload = format!("{}.{}", issued, URL_SAFE_NO_PAD.encode(identity));
        let tag = self.mac(&payload).finalize().into_bytes();
        format!("{}.{}", URL_SAFE_NO_PAD.encode(tag), payload)
    }

    fn open(&self, ticket: &str, now: i64) -> Option<String> {
        let (tag, payload) = ticket.split_once('.')?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;
        self.mac(payload).verify_slice(&tag).ok()?;

        let (issued, identity) = payload.split_once('.')?;
        let issued: i64 = issued.parse().ok()?;
        if let Some(timeout) = self.timeout {
            let max_age = i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX);
            if now.saturating_sub(issued) > max_age {
                return None;
            }
        }
        let identity = String::from_utf8(URL_SAFE_NO_PAD.decode(identity).ok()?).ok()?;
        (!identity.is_empty()).then_some(identity)
    }

    fn mac(&self, payload: &str) -> HmacSha512 {
        let mut mac = self.ticket_mac.clone();
        mac.update(payload.as_bytes());
        mac
    }
}
