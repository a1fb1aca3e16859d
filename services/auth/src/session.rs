//! Session management via a signed cookie
//!
//! The session lives entirely in a client-held cookie protected by the
//! signing key; there is no server-side store. The payload caches the
//! user's id and display name at login time and is not re-validated
//! against the database on later requests.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::User;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Authenticated identity carried in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i64,
    pub user_name: String,
}

/// Establish a session for a freshly authenticated user
pub fn establish(jar: SignedCookieJar, user: &User) -> Result<SignedCookieJar> {
    info!("Establishing session for user {}", user.id);

    let data = SessionData {
        user_id: user.id,
        user_name: user.name.clone(),
    };
    let value = serde_json::to_string(&data)?;

    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .build();

    Ok(jar.add(cookie))
}

/// Read the current session, if any
///
/// Returns `None` for a missing cookie, a bad signature (the jar drops
/// those before we see them), or an undecodable payload.
pub fn current(jar: &SignedCookieJar) -> Option<SessionData> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

/// Clear the session unconditionally
pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}
