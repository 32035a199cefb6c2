//! Login state: the session cookie, and the extractors gating routes on it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use chrono::Utc;
use entity::users;
use platform_authn::Principal;
use time::Duration as TimeDuration;
use tracing::warn;
use uuid::Uuid;

use super::{AppState, HttpError};

pub const SESSION_COOKIE: &str = "ems_session";

/// Whoever is behind the request, if anyone.
#[derive(Clone, Debug, Default)]
pub struct Viewer(pub Option<Principal>);

impl Viewer {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|p| p.is_admin)
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(viewer) = parts.extensions.get::<Viewer>() {
            return Ok(viewer.clone());
        }
        let jar = <PrivateCookieJar as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let viewer = match session_id(&jar) {
            Some(id) => platform_db::resolve_session(&state.pool, id, Utc::now())
                .await
                .map_err(HttpError::internal)?
                .map(principal),
            None => None,
        };
        let viewer = Viewer(viewer);
        parts.extensions.insert(viewer.clone());
        Ok(viewer)
    }
}

/// Any logged-in user; anonymous requests are sent to the login page.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Principal);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match Viewer::from_request_parts(parts, state).await {
            Ok(Viewer(Some(principal))) => Ok(CurrentUser(principal)),
            Ok(Viewer(None)) => Err(Redirect::to("/login").into_response()),
            Err(err) => Err(err.into_response()),
        }
    }
}

/// A logged-in admin. Anonymous requests go to the login page, everyone
/// else gets `403 Permission Denied`.
#[derive(Clone, Debug)]
pub struct AdminUser(pub Principal);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(principal) = CurrentUser::from_request_parts(parts, state).await?;
        if let Err(err) = principal.require_admin() {
            warn!(user_id = principal.id, %err, "admin route refused");
            return Err(HttpError::new(StatusCode::FORBIDDEN, "Permission Denied").into_response());
        }
        Ok(AdminUser(principal))
    }
}

pub fn principal(user: users::Model) -> Principal {
    Principal {
        id: user.id,
        name: user.name,
        is_admin: user.is_admin,
    }
}

pub fn session_id(jar: &PrivateCookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn session_cookie(state: &AppState, session_id: Uuid) -> Cookie<'static> {
    let max_age = TimeDuration::seconds(state.config.session_ttl.num_seconds());
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

pub fn clear_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}
