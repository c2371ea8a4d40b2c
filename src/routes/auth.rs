//! Auth routes — demo-session login, logout, introspection.
//!
//! The login is deliberately a mock: any non-empty username/password pair is
//! accepted. See `services::session` for why this is not an auth boundary.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::routes::{ApiError, api_error};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::days(7))
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Demo-session user extracted from the session cookie.
/// Use as a handler parameter to require a logged-in session.
pub struct AuthUser {
    pub username: String,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let username = session::validate_demo_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { username, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub username: String,
}

/// `POST /api/auth/login` — create a demo session and set the cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<MeResponse>), ApiError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.trim().is_empty() {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "demo login requires a username and password",
        ));
    }

    let token = session::create_demo_session(&state.pool, username)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "demo session create failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "error signing in")
        })?;

    tracing::info!(%username, "demo session created");
    let jar = jar.add(session_cookie(token));
    Ok((jar, Json(MeResponse { username: username.to_owned() })))
}

/// `POST /api/auth/logout` — delete the session and its draft, clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, StatusCode), ApiError> {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if !token.is_empty() {
        state.drafts.remove(token).await;
        session::delete_demo_session(&state.pool, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "demo session delete failed");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "error signing out")
            })?;
    }

    let jar = jar.remove(Cookie::build((COOKIE_NAME, "")).path("/").build());
    Ok((jar, StatusCode::NO_CONTENT))
}

/// `GET /api/auth/me` — current demo session.
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse { username: auth.username })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
