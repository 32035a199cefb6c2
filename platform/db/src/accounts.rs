use chrono::Utc;
use entity::users;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IsolationLevel, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::{DbPool, DbResult};

/// Insert a user whose password has already been hashed.
///
/// A taken name surfaces as [`crate::DbError::Duplicate`].
pub async fn create_user(
    pool: &DbPool,
    name: &str,
    password_hash: String,
    is_admin: bool,
) -> DbResult<users::Model> {
    insert_user(pool, name, password_hash, is_admin).await
}

/// Self-service registration. `wants_admin` is granted only when an admin is
/// registering the account or no account exists yet.
///
/// The emptiness check and the insert share one serializable transaction,
/// so of two racing first registrations at most one commits as admin; the
/// other fails with a serialization error on Postgres.
pub async fn register_user(
    pool: &DbPool,
    name: &str,
    password_hash: String,
    wants_admin: bool,
    by_admin: bool,
) -> DbResult<users::Model> {
    let txn = pool
        .begin_with_config(Some(IsolationLevel::Serializable), None)
        .await?;
    let is_admin = wants_admin && (by_admin || users::Entity::find().count(&txn).await? == 0);
    let user = insert_user(&txn, name, password_hash, is_admin).await?;
    txn.commit().await?;
    Ok(user)
}

async fn insert_user<C: ConnectionTrait>(
    db: &C,
    name: &str,
    password_hash: String,
    is_admin: bool,
) -> DbResult<users::Model> {
    let model = users::ActiveModel {
        name: Set(name.to_owned()),
        password_hash: Set(password_hash),
        is_admin: Set(is_admin),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

pub async fn find_user_by_name(pool: &DbPool, name: &str) -> DbResult<Option<users::Model>> {
    Ok(users::Entity::find()
        .filter(users::Column::Name.eq(name))
        .one(pool)
        .await?)
}

pub async fn find_user(pool: &DbPool, id: i32) -> DbResult<Option<users::Model>> {
    Ok(users::Entity::find_by_id(id).one(pool).await?)
}

pub async fn user_count(pool: &DbPool) -> DbResult<u64> {
    Ok(users::Entity::find().count(pool).await?)
}
