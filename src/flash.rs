//! One-shot notifications carried across a redirect in a short-lived
//! cookie and drained by the next rendered page.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

const COOKIE_NAME: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
}

impl Level {
    /// CSS class used by the templates.
    pub fn class(self) -> &'static str {
        match self {
            Level::Success => "flash-success",
            Level::Warning => "flash-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

/// Append a message to the pending flashes.
pub fn push(jar: CookieJar, level: Level, message: impl Into<String>) -> CookieJar {
    let mut pending = peek(&jar);
    pending.push(Flash {
        level,
        message: message.into(),
    });
    let encoded = hex::encode(serde_json::to_vec(&pending).unwrap_or_default());
    jar.add(
        Cookie::build((COOKIE_NAME, encoded))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

/// Read and clear the pending flashes.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let pending = peek(&jar);
    let jar = jar.remove(Cookie::build((COOKIE_NAME, "")).path("/").build());
    (jar, pending)
}

fn peek(jar: &CookieJar) -> Vec<Flash> {
    jar.get(COOKIE_NAME)
        .and_then(|c| hex::decode(c.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}
