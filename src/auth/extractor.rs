use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::models::user::ROLE_ADMIN;
use crate::state::SharedState;

pub const SESSION_COOKIE: &str = "access_token";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.roles.iter().any(|r| r == ROLE_ADMIN) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

/// Non-rejecting session probe, for pages that only need to know whether
/// somebody is signed in (e.g. the registration guard).
pub fn session_user(jar: &CookieJar, state: &SharedState) -> Option<AuthUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let claims = jwt::decode_token(cookie.value(), &state.config.jwt_secret).ok()?;
    Some(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        roles: claims.roles,
    })
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            let claims = jwt::decode_token(cookie.value(), &state.config.jwt_secret)
                .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))?;

            return Ok(AuthUser {
                user_id: claims.sub,
                email: claims.email,
                roles: claims.roles,
            });
        }

        Err(AppError::Unauthorized(
            "Missing authentication token".to_string(),
        ))
    }
}
