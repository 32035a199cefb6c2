//! Admin panel and the two-step employee create/edit flow.
//!
//! Step one picks a department; step two offers only the professions linked
//! to it. The final POST re-checks the link, so a stale or forged form
//! cannot assign a profession from another department.

use axum::extract::{Form, Path, State};
use axum_extra::extract::cookie::PrivateCookieJar;
use platform_db::DbError;
use tracing::info;

use super::{
    AppState, Page, Redirected, done, fail,
    forms::{DepartmentChoice, EmployeeForm},
    reject, render,
    session::AdminUser,
};
use crate::views;

const PANEL: &str = "/admin";
const NEW_EMPLOYEE: &str = "/admin/employees/new";

pub async fn panel(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Page {
    match platform_db::list_employee_rows(&state.pool).await {
        Ok(rows) => Ok(render(jar, Some(&admin), "Admin Panel", views::panel(&rows))),
        Err(err) => Err(fail(jar, err, "admin panel", "/")),
    }
}

pub async fn new_employee(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Page {
    match platform_db::list_departments(&state.pool).await {
        Ok(departments) => Ok(render(
            jar,
            Some(&admin),
            "Add Employee",
            views::employee_department_step(NEW_EMPLOYEE, &departments, None),
        )),
        Err(err) => Err(fail(jar, err, "new employee", PANEL)),
    }
}

pub async fn new_employee_profession(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(choice): Form<DepartmentChoice>,
) -> Page {
    let Some(department_id) = choice.department_id() else {
        return Err(reject(jar, "Department is required", NEW_EMPLOYEE));
    };
    let (department, professions) =
        match department_with_professions(&state, department_id).await {
            Ok(Some(found)) => found,
            Ok(None) => return Err(reject(jar, "Department not found", NEW_EMPLOYEE)),
            Err(err) => return Err(fail(jar, err, "new employee", NEW_EMPLOYEE)),
        };
    Ok(render(
        jar,
        Some(&admin),
        "Add Employee",
        views::employee_profession_step("/admin/employees", &department, &professions, None),
    ))
}

pub async fn create_employee(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<EmployeeForm>,
) -> Redirected {
    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => return reject(jar, message, NEW_EMPLOYEE),
    };
    match platform_db::create_employee(&state.pool, input).await {
        Ok(employee) => {
            info!(admin_id = admin.id, employee_id = employee.id, "employee created");
            done(jar, "Employee added successfully", PANEL)
        }
        Err(err) => match assignment_problem(&err) {
            Some(message) => reject(jar, message, NEW_EMPLOYEE),
            None => fail(jar, err, "create employee", NEW_EMPLOYEE),
        },
    }
}

pub async fn edit_employee(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Page {
    let employee = match platform_db::find_employee(&state.pool, id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => return Err(reject(jar, "Employee not found", PANEL)),
        Err(err) => return Err(fail(jar, err, "edit employee", PANEL)),
    };
    let departments = match platform_db::list_departments(&state.pool).await {
        Ok(departments) => departments,
        Err(err) => return Err(fail(jar, err, "edit employee", PANEL)),
    };
    let action = format!("/admin/employees/{id}/edit");
    Ok(render(
        jar,
        Some(&admin),
        "Edit Employee",
        views::employee_department_step(&action, &departments, Some(employee.department_id)),
    ))
}

pub async fn edit_employee_profession(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
    Form(choice): Form<DepartmentChoice>,
) -> Page {
    let back = format!("/admin/employees/{id}/edit");
    let employee = match platform_db::find_employee(&state.pool, id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => return Err(reject(jar, "Employee not found", PANEL)),
        Err(err) => return Err(fail(jar, err, "edit employee", PANEL)),
    };
    let Some(department_id) = choice.department_id() else {
        return Err(reject(jar, "Department is required", &back));
    };
    let (department, professions) =
        match department_with_professions(&state, department_id).await {
            Ok(Some(found)) => found,
            Ok(None) => return Err(reject(jar, "Department not found", &back)),
            Err(err) => return Err(fail(jar, err, "edit employee", &back)),
        };
    let action = format!("/admin/employees/{id}");
    Ok(render(
        jar,
        Some(&admin),
        "Edit Employee",
        views::employee_profession_step(&action, &department, &professions, Some(&employee)),
    ))
}

pub async fn update_employee(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
    Form(form): Form<EmployeeForm>,
) -> Redirected {
    let back = format!("/admin/employees/{id}/edit");
    let input = match form.validate() {
        Ok(input) => input,
        Err(message) => return reject(jar, message, &back),
    };
    match platform_db::update_employee(&state.pool, id, input).await {
        Ok(_) => {
            info!(admin_id = admin.id, employee_id = id, "employee updated");
            done(jar, "Employee updated successfully", PANEL)
        }
        Err(DbError::NotFound) => reject(jar, "Employee not found", PANEL),
        Err(err) => match assignment_problem(&err) {
            Some(message) => reject(jar, message, &back),
            None => fail(jar, err, "update employee", &back),
        },
    }
}

pub async fn delete_employee(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Redirected {
    match platform_db::delete_employee(&state.pool, id).await {
        Ok(()) => {
            info!(admin_id = admin.id, employee_id = id, "employee deleted");
            done(jar, "Employee deleted successfully", PANEL)
        }
        Err(DbError::NotFound) => reject(jar, "Employee not found", PANEL),
        Err(err) => fail(jar, err, "delete employee", PANEL),
    }
}

async fn department_with_professions(
    state: &AppState,
    department_id: i32,
) -> Result<Option<(entity::departments::Model, Vec<entity::professions::Model>)>, DbError> {
    let Some(department) = platform_db::find_department(&state.pool, department_id).await? else {
        return Ok(None);
    };
    let professions = platform_db::professions_for_department(&state.pool, department_id).await?;
    Ok(Some((department, professions)))
}

fn assignment_problem(err: &DbError) -> Option<&'static str> {
    match err {
        DbError::InvalidReference("department") => Some("Department not found"),
        DbError::InvalidReference(_) => Some("Profession not found"),
        DbError::NotInDepartment => Some("Profession is not available in this department"),
        _ => None,
    }
}
