//! Departments, professions, and the department/profession link table.

use entity::{department_professions, departments, professions};
use sea_orm::sea_query::Query;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::{DbError, DbPool, DbResult};

pub async fn list_departments(pool: &DbPool) -> DbResult<Vec<departments::Model>> {
    Ok(departments::Entity::find()
        .order_by_asc(departments::Column::Name)
        .order_by_asc(departments::Column::Id)
        .all(pool)
        .await?)
}

pub async fn find_department(pool: &DbPool, id: i32) -> DbResult<Option<departments::Model>> {
    Ok(departments::Entity::find_by_id(id).one(pool).await?)
}

pub async fn create_department(pool: &DbPool, name: &str) -> DbResult<departments::Model> {
    let model = departments::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    };
    Ok(model.insert(pool).await?)
}

pub async fn rename_department(
    pool: &DbPool,
    id: i32,
    name: &str,
) -> DbResult<departments::Model> {
    let model = departments::ActiveModel {
        id: Set(id),
        name: Set(name.to_owned()),
    };
    Ok(model.update(pool).await?)
}

/// Removes exactly one department; a missing id is [`DbError::NotFound`].
pub async fn delete_department(pool: &DbPool, id: i32) -> DbResult<()> {
    let result = departments::Entity::delete_by_id(id).exec(pool).await?;
    expect_one(result.rows_affected)
}

pub async fn list_professions(pool: &DbPool) -> DbResult<Vec<professions::Model>> {
    Ok(professions::Entity::find()
        .order_by_asc(professions::Column::Name)
        .order_by_asc(professions::Column::Id)
        .all(pool)
        .await?)
}

pub async fn find_profession(pool: &DbPool, id: i32) -> DbResult<Option<professions::Model>> {
    Ok(professions::Entity::find_by_id(id).one(pool).await?)
}

pub async fn create_profession(pool: &DbPool, name: &str) -> DbResult<professions::Model> {
    let model = professions::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    };
    Ok(model.insert(pool).await?)
}

pub async fn rename_profession(
    pool: &DbPool,
    id: i32,
    name: &str,
) -> DbResult<professions::Model> {
    let model = professions::ActiveModel {
        id: Set(id),
        name: Set(name.to_owned()),
    };
    Ok(model.update(pool).await?)
}

/// Removes exactly one profession; a missing id is [`DbError::NotFound`].
pub async fn delete_profession(pool: &DbPool, id: i32) -> DbResult<()> {
    let result = professions::Entity::delete_by_id(id).exec(pool).await?;
    expect_one(result.rows_affected)
}

/// Professions selectable for employees of `department_id`.
pub async fn professions_for_department(
    pool: &DbPool,
    department_id: i32,
) -> DbResult<Vec<professions::Model>> {
    Ok(professions::Entity::find()
        .inner_join(department_professions::Entity)
        .filter(department_professions::Column::DepartmentId.eq(department_id))
        .order_by_asc(professions::Column::Name)
        .order_by_asc(professions::Column::Id)
        .all(pool)
        .await?)
}

pub async fn professions_outside_department(
    pool: &DbPool,
    department_id: i32,
) -> DbResult<Vec<professions::Model>> {
    let linked = Query::select()
        .column(department_professions::Column::ProfessionId)
        .from(department_professions::Entity)
        .and_where(department_professions::Column::DepartmentId.eq(department_id))
        .to_owned();
    Ok(professions::Entity::find()
        .filter(professions::Column::Id.not_in_subquery(linked))
        .order_by_asc(professions::Column::Name)
        .order_by_asc(professions::Column::Id)
        .all(pool)
        .await?)
}

pub async fn link_profession(pool: &DbPool, department_id: i32, profession_id: i32) -> DbResult<()> {
    if find_department(pool, department_id).await?.is_none() {
        return Err(DbError::InvalidReference("department"));
    }
    if find_profession(pool, profession_id).await?.is_none() {
        return Err(DbError::InvalidReference("profession"));
    }
    department_professions::ActiveModel {
        department_id: Set(department_id),
        profession_id: Set(profession_id),
    }
    .insert(pool)
    .await?;
    Ok(())
}

pub async fn unlink_profession(
    pool: &DbPool,
    department_id: i32,
    profession_id: i32,
) -> DbResult<()> {
    let result = department_professions::Entity::delete_by_id((department_id, profession_id))
        .exec(pool)
        .await?;
    expect_one(result.rows_affected)
}

pub(crate) async fn is_linked(
    pool: &DbPool,
    department_id: i32,
    profession_id: i32,
) -> DbResult<bool> {
    Ok(department_professions::Entity::find_by_id((department_id, profession_id))
        .one(pool)
        .await?
        .is_some())
}

fn expect_one(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        _ => Ok(()),
    }
}
