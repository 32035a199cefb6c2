use anyhow::Result;
use ems_tests::{employee, fresh_db, seed_catalog};
use platform_db::DbError;

#[tokio::test]
async fn departments_list_by_name() -> Result<()> {
    let pool = fresh_db().await?;
    platform_db::create_department(&pool, "Sales").await?;
    platform_db::create_department(&pool, "Engineering").await?;
    let names: Vec<_> = platform_db::list_departments(&pool)
        .await?
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["Engineering", "Sales"]);
    Ok(())
}

#[tokio::test]
async fn rename_needs_an_existing_row() -> Result<()> {
    let pool = fresh_db().await?;
    let tester = platform_db::create_profession(&pool, "Tester").await?;
    let renamed = platform_db::rename_profession(&pool, tester.id, "QA Engineer").await?;
    assert_eq!(renamed.name, "QA Engineer");

    let err = platform_db::rename_profession(&pool, tester.id + 100, "Ghost")
        .await
        .expect_err("missing profession");
    assert!(matches!(err, DbError::NotFound));
    let err = platform_db::rename_department(&pool, 42, "Ghost")
        .await
        .expect_err("missing department");
    assert!(matches!(err, DbError::NotFound));
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_one_row() -> Result<()> {
    let pool = fresh_db().await?;
    let a = platform_db::create_profession(&pool, "Developer").await?;
    platform_db::create_profession(&pool, "Tester").await?;

    platform_db::delete_profession(&pool, a.id).await?;
    let left = platform_db::list_professions(&pool).await?;
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Tester");

    let err = platform_db::delete_profession(&pool, a.id)
        .await
        .expect_err("already deleted");
    assert!(matches!(err, DbError::NotFound));
    assert_eq!(platform_db::list_professions(&pool).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn links_split_professions_per_department() -> Result<()> {
    let pool = fresh_db().await?;
    let catalog = seed_catalog(&pool).await?;

    let linked: Vec<_> = platform_db::professions_for_department(&pool, catalog.engineering)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(linked, [catalog.developer, catalog.tester]);

    let outside: Vec<_> = platform_db::professions_outside_department(&pool, catalog.engineering)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(outside, [catalog.account_manager]);
    Ok(())
}

#[tokio::test]
async fn linking_checks_both_sides_and_duplicates() -> Result<()> {
    let pool = fresh_db().await?;
    let catalog = seed_catalog(&pool).await?;

    let err = platform_db::link_profession(&pool, 999, catalog.developer)
        .await
        .expect_err("unknown department");
    assert!(matches!(err, DbError::InvalidReference("department")));
    let err = platform_db::link_profession(&pool, catalog.sales, 999)
        .await
        .expect_err("unknown profession");
    assert!(matches!(err, DbError::InvalidReference("profession")));
    let err = platform_db::link_profession(&pool, catalog.engineering, catalog.developer)
        .await
        .expect_err("already linked");
    assert!(matches!(err, DbError::Duplicate));
    Ok(())
}

#[tokio::test]
async fn unlinking_is_exact() -> Result<()> {
    let pool = fresh_db().await?;
    let catalog = seed_catalog(&pool).await?;

    platform_db::unlink_profession(&pool, catalog.engineering, catalog.tester).await?;
    let linked = platform_db::professions_for_department(&pool, catalog.engineering).await?;
    assert_eq!(linked.len(), 1);

    let err = platform_db::unlink_profession(&pool, catalog.engineering, catalog.tester)
        .await
        .expect_err("already unlinked");
    assert!(matches!(err, DbError::NotFound));
    Ok(())
}

#[tokio::test]
async fn departments_in_use_cannot_be_deleted() -> Result<()> {
    let pool = fresh_db().await?;
    let catalog = seed_catalog(&pool).await?;
    platform_db::create_employee(
        &pool,
        employee("Ann", 1000, catalog.sales, catalog.account_manager),
    )
    .await?;

    let err = platform_db::delete_department(&pool, catalog.sales)
        .await
        .expect_err("department has employees");
    assert!(matches!(err, DbError::ForeignKey));
    let err = platform_db::delete_profession(&pool, catalog.account_manager)
        .await
        .expect_err("profession has employees");
    assert!(matches!(err, DbError::ForeignKey));

    // Links go with their department.
    platform_db::delete_department(&pool, catalog.engineering).await?;
    let outside = platform_db::professions_outside_department(&pool, catalog.engineering).await?;
    assert_eq!(outside.len(), 3);
    Ok(())
}
