mod config;
mod http;
mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use platform_authn::hash_password;
use platform_db::{DatabaseSettings, DbError, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "ems-server", version, about = "Employee management server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Create an admin account and, optionally, sample catalog data.
    Seed(SeedCommand),
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 3000)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct SeedCommand {
    #[arg(long, env = "SEED_ADMIN_NAME", default_value = "admin")]
    admin_name: String,
    #[arg(long, env = "SEED_ADMIN_PASSWORD")]
    admin_password: String,
    #[arg(long, help = "Also create sample departments and professions")]
    sample: bool,
}

/// Departments with the professions offered in each.
const SAMPLE_CATALOG: &[(&str, &[&str])] = &[
    ("Engineering", &["Developer", "Tester"]),
    ("Sales", &["Account Manager"]),
    ("Operations", &["Developer", "Administrator"]),
];

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed(cmd) => run_seed(cmd).await,
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings)
        .await
        .context("failed to connect to the database")
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let state = AppState { pool, config };
    http::serve(ServeConfig::from(&cmd), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() {
        if !allow_dirty {
            anyhow::bail!(
                "pending migrations detected; run `ems-server migrate up` or pass --allow-dirty"
            );
        }
        warn!(pending = pending.len(), "starting with pending migrations");
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn run_seed(cmd: SeedCommand) -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;

    let password_hash = hash_password(&cmd.admin_password).context("failed to hash password")?;
    match platform_db::create_user(&pool, &cmd.admin_name, password_hash, true).await {
        Ok(user) => info!(user_id = user.id, name = %user.name, "admin account created"),
        Err(DbError::Duplicate) => warn!(name = %cmd.admin_name, "admin account already exists"),
        Err(err) => return Err(err).context("failed to create admin account"),
    }

    if cmd.sample {
        seed_catalog(&pool).await?;
    }
    Ok(())
}

async fn seed_catalog(pool: &DbPool) -> Result<()> {
    let mut professions = Vec::<(String, i32)>::new();
    for (department_name, profession_names) in SAMPLE_CATALOG {
        let department = platform_db::create_department(pool, department_name).await?;
        for name in profession_names.iter() {
            let id = match professions.iter().find(|(known, _)| known == name) {
                Some((_, id)) => *id,
                None => {
                    let profession = platform_db::create_profession(pool, name).await?;
                    professions.push((profession.name, profession.id));
                    profession.id
                }
            };
            platform_db::link_profession(pool, department.id, id).await?;
        }
    }
    info!(
        departments = SAMPLE_CATALOG.len(),
        professions = professions.len(),
        "sample catalog created"
    );
    Ok(())
}
