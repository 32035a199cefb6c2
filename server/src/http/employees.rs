use axum::extract::{Query, State};
use axum_extra::extract::cookie::PrivateCookieJar;
use entity::{departments, professions};
use platform_db::{DbResult, EmployeePage};

use super::{AppState, Page, fail, forms::EmployeeQuery, render, session::Viewer};
use crate::views;

/// Public, filterable employee list.
pub async fn index(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    viewer: Viewer,
    Query(query): Query<EmployeeQuery>,
) -> Page {
    let (page, departments, professions) = match load(&state, &query).await {
        Ok(loaded) => loaded,
        Err(err) => return Err(fail(jar, err, "list employees", "/")),
    };
    let body = views::employee_list(&page, &query.filter(), &departments, &professions);
    Ok(render(jar, viewer.principal(), "Employees", body))
}

async fn load(
    state: &AppState,
    query: &EmployeeQuery,
) -> DbResult<(EmployeePage, Vec<departments::Model>, Vec<professions::Model>)> {
    let departments = platform_db::list_departments(&state.pool).await?;
    let professions = platform_db::list_professions(&state.pool).await?;
    let page = platform_db::list_employees(
        &state.pool,
        &query.filter(),
        query.page(),
        state.config.page_size,
    )
    .await?;
    Ok((page, departments, professions))
}
