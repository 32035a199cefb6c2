mod admin;
mod auth;
mod departments;
mod employees;
pub(crate) mod flash;
mod forms;
mod professions;
mod session;

use std::{
    fmt::Display,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{FromRef, State},
    http::{HeaderName, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use platform_authn::Principal;
use platform_db::DbPool;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{config::AppConfig, views};

use self::flash::FlashExt;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.config.cookie_key.clone()
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee management server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(auth::index))
        .route("/health", get(health_handler))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/employees", get(employees::index))
        .route("/admin", get(admin::panel))
        .route("/admin/employees", post(admin::create_employee))
        .route(
            "/admin/employees/new",
            get(admin::new_employee).post(admin::new_employee_profession),
        )
        .route("/admin/employees/{id}", post(admin::update_employee))
        .route(
            "/admin/employees/{id}/edit",
            get(admin::edit_employee).post(admin::edit_employee_profession),
        )
        .route("/admin/employees/{id}/delete", post(admin::delete_employee))
        .route("/departments", get(departments::index))
        .route(
            "/departments/new",
            get(departments::new_form).post(departments::create),
        )
        .route(
            "/departments/{id}/edit",
            get(departments::edit_form).post(departments::update),
        )
        .route("/departments/{id}/delete", post(departments::delete))
        .route(
            "/departments/{id}/professions",
            get(departments::professions).post(departments::link_profession),
        )
        .route(
            "/departments/{id}/professions/{profession_id}/delete",
            post(departments::unlink_profession),
        )
        .route("/professions", get(professions::index))
        .route(
            "/professions/new",
            get(professions::new_form).post(professions::create),
        )
        .route(
            "/professions/{id}/edit",
            get(professions::edit_form).post(professions::update),
        )
        .route("/professions/{id}/delete", post(professions::delete))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.pool.get_database_backend();
    let db_ok = state
        .pool
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

/// A page plus the jar with any consumed flash cookie cleared.
type Rendered = (PrivateCookieJar, Html<String>);

/// A redirect plus the jar carrying the flash to show on the next page.
type Redirected = (PrivateCookieJar, Redirect);

/// Pages that bounce elsewhere with a flash when loading fails.
type Page = Result<Rendered, Redirected>;

/// Wrap `body` in the layout, consuming pending flash messages.
fn render(
    jar: PrivateCookieJar,
    viewer: Option<&Principal>,
    title: &str,
    body: String,
) -> Rendered {
    let (jar, flashes) = jar.take_flashes();
    let chrome = views::Chrome {
        title,
        viewer,
        flashes: &flashes,
    };
    (jar, views::layout(&chrome, &body))
}

/// Log a database failure and bounce back with the generic flash message.
fn fail(jar: PrivateCookieJar, err: impl Display, action: &str, back: &str) -> Redirected {
    error!(error = %err, action, "request failed");
    (
        jar.flash_error("Internal Server Error"),
        Redirect::to(back),
    )
}

fn reject(jar: PrivateCookieJar, message: &str, back: &str) -> Redirected {
    (jar.flash_error(message), Redirect::to(back))
}

fn done(jar: PrivateCookieJar, message: &str, next: &str) -> Redirected {
    (jar.flash_success(message), Redirect::to(next))
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
        }
    }

    fn internal(err: impl Display) -> Self {
        error!(error = %err, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
