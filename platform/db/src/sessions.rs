use chrono::{DateTime, Duration, Utc};
use entity::{sessions, users};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;
use uuid::Uuid;

use crate::{DbPool, DbResult};

pub async fn create_session(
    pool: &DbPool,
    user_id: i32,
    ttl: Duration,
) -> DbResult<sessions::Model> {
    let now = Utc::now();
    let model = sessions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: Set(now.into()),
        expires_at: Set((now + ttl).into()),
    };
    Ok(model.insert(pool).await?)
}

/// Load the user behind a session id.
///
/// Unknown ids and sessions past `now` resolve to `None`; expired rows are
/// removed on the way.
pub async fn resolve_session(
    pool: &DbPool,
    session_id: Uuid,
    now: DateTime<Utc>,
) -> DbResult<Option<users::Model>> {
    let Some(session) = sessions::Entity::find_by_id(session_id).one(pool).await? else {
        return Ok(None);
    };
    if session.expires_at.with_timezone(&Utc) < now {
        debug!(%session_id, "dropping expired session");
        delete_session(pool, session_id).await?;
        return Ok(None);
    }
    Ok(users::Entity::find_by_id(session.user_id).one(pool).await?)
}

pub async fn delete_session(pool: &DbPool, session_id: Uuid) -> DbResult<()> {
    sessions::Entity::delete_by_id(session_id).exec(pool).await?;
    Ok(())
}

pub async fn purge_expired_sessions(pool: &DbPool, now: DateTime<Utc>) -> DbResult<u64> {
    let cutoff: DateTimeWithTimeZone = now.into();
    let result = sessions::Entity::delete_many()
        .filter(sessions::Column::ExpiresAt.lt(cutoff))
        .exec(pool)
        .await?;
    Ok(result.rows_affected)
}
