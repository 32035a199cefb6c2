use entity::{departments, employees, professions};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait, Select, Set,
    sea_query::{Expr, Func},
};

use crate::{DbError, DbPool, DbResult, catalog};

/// Conjunctive filters for the public employee list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub department_id: Option<i32>,
    pub profession_id: Option<i32>,
    /// Case-insensitive substring match on the employee name.
    pub search: Option<String>,
}

/// An employee joined with its department and profession names.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub salary: i64,
    pub department_id: i32,
    pub profession_id: i32,
    pub department: Option<String>,
    pub profession: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeePage {
    pub rows: Vec<EmployeeRow>,
    /// Zero-based.
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: i64,
    pub department_id: i32,
    pub profession_id: i32,
}

fn joined() -> Select<employees::Entity> {
    employees::Entity::find()
        .select_only()
        .column(employees::Column::Id)
        .column(employees::Column::Name)
        .column(employees::Column::Salary)
        .column(employees::Column::DepartmentId)
        .column(employees::Column::ProfessionId)
        .column_as(departments::Column::Name, "department")
        .column_as(professions::Column::Name, "profession")
        .join(JoinType::LeftJoin, employees::Relation::Department.def())
        .join(JoinType::LeftJoin, employees::Relation::Profession.def())
        .order_by_asc(employees::Column::Id)
}

fn filtered(filter: &EmployeeFilter) -> Select<employees::Entity> {
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    joined()
        .apply_if(filter.department_id, |q, id| {
            q.filter(employees::Column::DepartmentId.eq(id))
        })
        .apply_if(filter.profession_id, |q, id| {
            q.filter(employees::Column::ProfessionId.eq(id))
        })
        // Postgres LIKE is case-sensitive, so fold both sides.
        .apply_if(search, |q, s| {
            let name = Expr::col((employees::Entity, employees::Column::Name));
            q.filter(Expr::expr(Func::lower(name)).like(format!("%{}%", s.to_lowercase())))
        })
}

pub async fn list_employees(
    pool: &DbPool,
    filter: &EmployeeFilter,
    page: u64,
    per_page: u64,
) -> DbResult<EmployeePage> {
    let paginator = filtered(filter)
        .into_model::<EmployeeRow>()
        .paginate(pool, per_page.max(1));
    let totals = paginator.num_items_and_pages().await?;
    let page = page.min(totals.number_of_pages.saturating_sub(1));
    let rows = paginator.fetch_page(page).await?;
    Ok(EmployeePage {
        rows,
        page,
        total_pages: totals.number_of_pages,
        total_items: totals.number_of_items,
    })
}

/// Every employee with names resolved, for the admin panel.
pub async fn list_employee_rows(pool: &DbPool) -> DbResult<Vec<EmployeeRow>> {
    Ok(joined().into_model::<EmployeeRow>().all(pool).await?)
}

pub async fn find_employee(pool: &DbPool, id: i32) -> DbResult<Option<employees::Model>> {
    Ok(employees::Entity::find_by_id(id).one(pool).await?)
}

/// Department and profession must exist and be linked to each other.
async fn check_assignment(pool: &DbPool, input: &EmployeeInput) -> DbResult<()> {
    if catalog::find_department(pool, input.department_id)
        .await?
        .is_none()
    {
        return Err(DbError::InvalidReference("department"));
    }
    if catalog::find_profession(pool, input.profession_id)
        .await?
        .is_none()
    {
        return Err(DbError::InvalidReference("profession"));
    }
    if !catalog::is_linked(pool, input.department_id, input.profession_id).await? {
        return Err(DbError::NotInDepartment);
    }
    Ok(())
}

pub async fn create_employee(pool: &DbPool, input: EmployeeInput) -> DbResult<employees::Model> {
    check_assignment(pool, &input).await?;
    let model = employees::ActiveModel {
        name: Set(input.name),
        salary: Set(input.salary),
        department_id: Set(input.department_id),
        profession_id: Set(input.profession_id),
        ..Default::default()
    };
    Ok(model.insert(pool).await?)
}

pub async fn update_employee(
    pool: &DbPool,
    id: i32,
    input: EmployeeInput,
) -> DbResult<employees::Model> {
    check_assignment(pool, &input).await?;
    let model = employees::ActiveModel {
        id: Set(id),
        name: Set(input.name),
        salary: Set(input.salary),
        department_id: Set(input.department_id),
        profession_id: Set(input.profession_id),
    };
    Ok(model.update(pool).await?)
}

/// Removes exactly one employee; a missing id is [`DbError::NotFound`].
pub async fn delete_employee(pool: &DbPool, id: i32) -> DbResult<()> {
    let result = employees::Entity::delete_by_id(id).exec(pool).await?;
    if result.rows_affected == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
