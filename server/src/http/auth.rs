//! Registration, login and logout.

use axum::extract::{Form, State};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::Utc;
use platform_authn::{hash_password, verify_password};
use platform_db::DbError;
use tracing::{info, warn};

use super::{
    AppState, HttpError, HttpResult, Redirected, Rendered, done, fail,
    forms::CredentialsForm,
    reject, render,
    session::{Viewer, clear_session_cookie, session_cookie, session_id},
};
use crate::views;

pub async fn index(jar: PrivateCookieJar, viewer: Viewer) -> Rendered {
    render(
        jar,
        viewer.principal(),
        "Employee Management",
        views::home(viewer.principal()),
    )
}

/// The admin checkbox is offered to the very first user and to admins.
async fn may_grant_admin(state: &AppState, viewer: &Viewer) -> Result<bool, DbError> {
    if viewer.is_admin() {
        return Ok(true);
    }
    Ok(platform_db::user_count(&state.pool).await? == 0)
}

pub async fn register_form(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    viewer: Viewer,
) -> HttpResult<Rendered> {
    let offer_admin = may_grant_admin(&state, &viewer)
        .await
        .map_err(HttpError::internal)?;
    Ok(render(
        jar,
        viewer.principal(),
        "Register",
        views::register(offer_admin),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    viewer: Viewer,
    Form(form): Form<CredentialsForm>,
) -> Redirected {
    let Some((name, password)) = form.credentials() else {
        return reject(jar, "Name and password are required", "/register");
    };
    let password = password.to_owned();
    let hashed = match tokio::task::spawn_blocking(move || hash_password(&password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(err)) => return fail(jar, err, "register", "/register"),
        Err(err) => return fail(jar, err, "register", "/register"),
    };

    let registered = platform_db::register_user(
        &state.pool,
        name,
        hashed,
        form.wants_admin(),
        viewer.is_admin(),
    )
    .await;
    match registered {
        Ok(user) => {
            info!(user_id = user.id, is_admin = user.is_admin, "user registered");
            done(jar, "Registration successful!", "/login")
        }
        Err(DbError::Duplicate) => reject(jar, "User with this name already exists", "/register"),
        Err(err) => fail(jar, err, "register", "/register"),
    }
}

pub async fn login_form(jar: PrivateCookieJar, viewer: Viewer) -> Rendered {
    render(jar, viewer.principal(), "Log in", views::login())
}

pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Redirected {
    const BAD_CREDENTIALS: &str = "Incorrect name or password";

    let Some((name, password)) = form.credentials() else {
        return reject(jar, "Name and password are required", "/login");
    };
    let user = match platform_db::find_user_by_name(&state.pool, name).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(name, "login for unknown user");
            return reject(jar, BAD_CREDENTIALS, "/login");
        }
        Err(err) => return fail(jar, err, "login", "/login"),
    };

    let password = password.to_owned();
    let stored = user.password_hash.clone();
    let verified =
        match tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await {
            Ok(Ok(verified)) => verified,
            Ok(Err(err)) => return fail(jar, err, "login", "/login"),
            Err(err) => return fail(jar, err, "login", "/login"),
        };
    if !verified {
        warn!(user_id = user.id, "login with wrong password");
        return reject(jar, BAD_CREDENTIALS, "/login");
    }

    if let Some(previous) = session_id(&jar) {
        if let Err(err) = platform_db::delete_session(&state.pool, previous).await {
            return fail(jar, err, "login", "/login");
        }
    }
    let session =
        match platform_db::create_session(&state.pool, user.id, state.config.session_ttl).await {
            Ok(session) => session,
            Err(err) => return fail(jar, err, "login", "/login"),
        };
    info!(user_id = user.id, "user logged in");
    let jar = jar.add(session_cookie(&state, session.id));
    done(jar, "Welcome!", "/")
}

pub async fn logout(State(state): State<AppState>, jar: PrivateCookieJar) -> Redirected {
    if let Some(id) = session_id(&jar) {
        if let Err(err) = platform_db::delete_session(&state.pool, id).await {
            return fail(jar, err, "logout", "/");
        }
    }
    if let Err(err) = platform_db::purge_expired_sessions(&state.pool, Utc::now()).await {
        warn!(error = %err, "expired session purge failed");
    }
    done(
        clear_session_cookie(jar),
        "You have been logged out successfully",
        "/",
    )
}
