//! Shared fixtures for the data-layer integration tests.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, EmployeeInput};

/// A migrated, private in-memory SQLite database.
pub async fn fresh_db() -> Result<DbPool> {
    let pool = platform_db::connect_url("sqlite::memory:", 1)
        .await
        .context("open sqlite")?;
    Migrator::up(&pool, None).await.context("migrate")?;
    Ok(pool)
}

/// Ids of a small catalog: two departments, three professions.
pub struct Catalog {
    pub engineering: i32,
    pub sales: i32,
    pub developer: i32,
    pub tester: i32,
    pub account_manager: i32,
}

/// Engineering offers developer and tester; sales offers account manager.
pub async fn seed_catalog(pool: &DbPool) -> Result<Catalog> {
    let engineering = platform_db::create_department(pool, "Engineering").await?.id;
    let sales = platform_db::create_department(pool, "Sales").await?.id;
    let developer = platform_db::create_profession(pool, "Developer").await?.id;
    let tester = platform_db::create_profession(pool, "Tester").await?.id;
    let account_manager = platform_db::create_profession(pool, "Account Manager").await?.id;
    platform_db::link_profession(pool, engineering, developer).await?;
    platform_db::link_profession(pool, engineering, tester).await?;
    platform_db::link_profession(pool, sales, account_manager).await?;
    Ok(Catalog {
        engineering,
        sales,
        developer,
        tester,
        account_manager,
    })
}

pub fn employee(name: &str, salary: i64, department_id: i32, profession_id: i32) -> EmployeeInput {
    EmployeeInput {
        name: name.to_owned(),
        salary,
        department_id,
        profession_id,
    }
}
