//! Database primitives: connection settings, the shared pool, and the
//! queries each route runs.

mod accounts;
mod catalog;
mod employees;
mod sessions;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use thiserror::Error;
use tracing::debug;

pub use accounts::{create_user, find_user, find_user_by_name, register_user, user_count};
pub use catalog::{
    create_department, create_profession, delete_department, delete_profession, find_department,
    find_profession, link_profession, list_departments, list_professions,
    professions_for_department, professions_outside_department, rename_department,
    rename_profession, unlink_profession,
};
pub use employees::{
    EmployeeFilter, EmployeeInput, EmployeePage, EmployeeRow, create_employee, delete_employee,
    find_employee, list_employee_rows, list_employees, update_employee,
};
pub use sessions::{create_session, delete_session, purge_expired_sessions, resolve_session};

/// Shared connection alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error("record already exists")]
    Duplicate,
    #[error("record not found")]
    NotFound,
    #[error("unknown {0}")]
    InvalidReference(&'static str),
    #[error("profession is not available in this department")]
    NotInDepartment,
    #[error("record is still referenced")]
    ForeignKey,
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for DbError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::RecordNotUpdated) {
            return DbError::NotFound;
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DbError::Duplicate,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => DbError::ForeignKey,
            _ => DbError::Database(err),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    pub max_connections: u32,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_max_connections() -> u32 {
    1
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(default_url_key())
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            max_connections: default_max_connections(),
        }
    }

    /// `DATABASE_URL` plus `DATABASE_MAX_CONNECTIONS` (defaults to a single connection).
    pub fn from_env() -> Self {
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(default_max_connections);
        Self {
            max_connections,
            ..Self::default()
        }
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl)
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    connect_url(&url, settings.max_connections).await
}

pub async fn connect_url(url: &str, max_connections: u32) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(max_connections)
        .sqlx_logging(false);
    debug!(max_connections, "connecting to database");
    Database::connect(options).await.map_err(DbError::from)
}
