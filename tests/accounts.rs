use anyhow::Result;
use chrono::{Duration, Utc};
use ems_tests::fresh_db;
use platform_authn::{hash_password, verify_password};
use platform_db::DbError;

#[tokio::test]
async fn names_are_unique() -> Result<()> {
    let pool = fresh_db().await?;
    platform_db::create_user(&pool, "ann", hash_password("pw")?, false).await?;
    let err = platform_db::create_user(&pool, "ann", hash_password("other")?, true)
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, DbError::Duplicate));
    assert_eq!(platform_db::user_count(&pool).await?, 1);
    Ok(())
}

#[tokio::test]
async fn stored_hash_verifies_only_the_original_password() -> Result<()> {
    let pool = fresh_db().await?;
    platform_db::create_user(&pool, "ann", hash_password("correct horse")?, false).await?;
    let user = platform_db::find_user_by_name(&pool, "ann")
        .await?
        .expect("stored user");
    assert_ne!(user.password_hash, "correct horse");
    assert!(verify_password("correct horse", &user.password_hash)?);
    assert!(!verify_password("battery staple", &user.password_hash)?);
    assert!(platform_db::find_user_by_name(&pool, "bob").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn sessions_resolve_until_they_expire() -> Result<()> {
    let pool = fresh_db().await?;
    let user = platform_db::create_user(&pool, "ann", hash_password("pw")?, true).await?;
    let session = platform_db::create_session(&pool, user.id, Duration::hours(1)).await?;

    let now = Utc::now();
    let resolved = platform_db::resolve_session(&pool, session.id, now).await?;
    assert_eq!(resolved.map(|u| u.id), Some(user.id));

    let later = now + Duration::hours(2);
    assert!(platform_db::resolve_session(&pool, session.id, later).await?.is_none());
    // Expired rows are removed on sight.
    assert!(platform_db::resolve_session(&pool, session.id, now).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn logout_and_purge_remove_sessions() -> Result<()> {
    let pool = fresh_db().await?;
    let user = platform_db::create_user(&pool, "ann", hash_password("pw")?, false).await?;
    let short = platform_db::create_session(&pool, user.id, Duration::minutes(1)).await?;
    let long = platform_db::create_session(&pool, user.id, Duration::days(1)).await?;
    let spare = platform_db::create_session(&pool, user.id, Duration::days(1)).await?;

    let purged = platform_db::purge_expired_sessions(&pool, Utc::now() + Duration::hours(1)).await?;
    assert_eq!(purged, 1);
    assert!(platform_db::resolve_session(&pool, short.id, Utc::now()).await?.is_none());

    platform_db::delete_session(&pool, long.id).await?;
    assert!(platform_db::resolve_session(&pool, long.id, Utc::now()).await?.is_none());
    assert!(platform_db::resolve_session(&pool, spare.id, Utc::now()).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_session_is_anonymous() -> Result<()> {
    let pool = fresh_db().await?;
    let missing = uuid::Uuid::new_v4();
    assert!(platform_db::resolve_session(&pool, missing, Utc::now()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn only_the_first_or_admin_granted_registration_is_admin() -> Result<()> {
    let pool = fresh_db().await?;
    let first = platform_db::register_user(&pool, "root", hash_password("pw")?, true, false).await?;
    assert!(first.is_admin);

    let self_service =
        platform_db::register_user(&pool, "mallory", hash_password("pw")?, true, false).await?;
    assert!(!self_service.is_admin);

    let granted = platform_db::register_user(&pool, "ops", hash_password("pw")?, true, true).await?;
    assert!(granted.is_admin);

    let plain = platform_db::register_user(&pool, "ann", hash_password("pw")?, false, true).await?;
    assert!(!plain.is_admin);

    let err = platform_db::register_user(&pool, "root", hash_password("pw")?, false, false)
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, DbError::Duplicate));
    assert_eq!(platform_db::user_count(&pool).await?, 4);
    Ok(())
}
