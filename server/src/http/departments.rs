use axum::extract::{Form, Path, State};
use axum_extra::extract::cookie::PrivateCookieJar;
use platform_db::DbError;
use tracing::info;

use super::{
    AppState, Page, Redirected, Rendered, done, fail,
    forms::{NameForm, ProfessionChoice},
    reject, render,
    session::AdminUser,
};
use crate::views::{self, CatalogPage};

const PAGE: CatalogPage = CatalogPage {
    singular: "Department",
    base: "/departments",
    with_professions: true,
};

pub async fn index(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Page {
    match platform_db::list_departments(&state.pool).await {
        Ok(departments) => {
            let body =
                views::catalog_index(PAGE, departments.iter().map(|d| (d.id, d.name.as_str())));
            Ok(render(jar, Some(&admin), "Departments", body))
        }
        Err(err) => Err(fail(jar, err, "list departments", "/")),
    }
}

pub async fn new_form(AdminUser(admin): AdminUser, jar: PrivateCookieJar) -> Rendered {
    render(
        jar,
        Some(&admin),
        "Create Department",
        views::catalog_form(PAGE, None),
    )
}

pub async fn create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<NameForm>,
) -> Redirected {
    let Some(name) = form.name() else {
        return reject(jar, "Department name is required", "/departments/new");
    };
    match platform_db::create_department(&state.pool, name).await {
        Ok(department) => {
            info!(admin_id = admin.id, department_id = department.id, "department created");
            done(jar, "Department added successfully", PAGE.base)
        }
        Err(err) => fail(jar, err, "create department", "/departments/new"),
    }
}

pub async fn edit_form(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Page {
    match platform_db::find_department(&state.pool, id).await {
        Ok(Some(department)) => Ok(render(
            jar,
            Some(&admin),
            "Edit Department",
            views::catalog_form(PAGE, Some((department.id, department.name.as_str()))),
        )),
        Ok(None) => Err(reject(jar, "Department not found", PAGE.base)),
        Err(err) => Err(fail(jar, err, "edit department", PAGE.base)),
    }
}

pub async fn update(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
    Form(form): Form<NameForm>,
) -> Redirected {
    let back = format!("/departments/{id}/edit");
    let Some(name) = form.name() else {
        return reject(jar, "Department name is required", &back);
    };
    match platform_db::rename_department(&state.pool, id, name).await {
        Ok(_) => {
            info!(admin_id = admin.id, department_id = id, "department renamed");
            done(jar, "Department updated successfully", PAGE.base)
        }
        Err(DbError::NotFound) => reject(jar, "Department not found", PAGE.base),
        Err(err) => fail(jar, err, "update department", &back),
    }
}

pub async fn delete(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Redirected {
    match platform_db::delete_department(&state.pool, id).await {
        Ok(()) => {
            info!(admin_id = admin.id, department_id = id, "department deleted");
            done(jar, "Department deleted successfully", PAGE.base)
        }
        Err(DbError::NotFound) => reject(jar, "Department not found", PAGE.base),
        Err(DbError::ForeignKey) => reject(jar, "Department still has employees", PAGE.base),
        Err(err) => fail(jar, err, "delete department", PAGE.base),
    }
}

/// Professions linked to the department, plus a form to link more.
pub async fn professions(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Page {
    let department = match platform_db::find_department(&state.pool, id).await {
        Ok(Some(department)) => department,
        Ok(None) => return Err(reject(jar, "Department not found", PAGE.base)),
        Err(err) => return Err(fail(jar, err, "department professions", PAGE.base)),
    };
    let lists = async {
        let linked = platform_db::professions_for_department(&state.pool, id).await?;
        let available = platform_db::professions_outside_department(&state.pool, id).await?;
        Ok::<_, DbError>((linked, available))
    };
    match lists.await {
        Ok((linked, available)) => Ok(render(
            jar,
            Some(&admin),
            &format!("Professions in {}", department.name),
            views::department_professions(id, &linked, &available),
        )),
        Err(err) => Err(fail(jar, err, "department professions", PAGE.base)),
    }
}

pub async fn link_profession(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
    Form(choice): Form<ProfessionChoice>,
) -> Redirected {
    let back = format!("/departments/{id}/professions");
    let Some(profession_id) = choice.profession_id() else {
        return reject(jar, "Profession is required", &back);
    };
    match platform_db::link_profession(&state.pool, id, profession_id).await {
        Ok(()) => {
            info!(admin_id = admin.id, department_id = id, profession_id, "profession linked");
            done(jar, "Profession assigned to department", &back)
        }
        Err(DbError::InvalidReference("department")) => {
            reject(jar, "Department not found", PAGE.base)
        }
        Err(DbError::InvalidReference(_)) => reject(jar, "Profession not found", &back),
        Err(DbError::Duplicate) => reject(
            jar,
            "Profession is already assigned to this department",
            &back,
        ),
        Err(err) => fail(jar, err, "link profession", &back),
    }
}

pub async fn unlink_profession(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path((id, profession_id)): Path<(i32, i32)>,
) -> Redirected {
    let back = format!("/departments/{id}/professions");
    match platform_db::unlink_profession(&state.pool, id, profession_id).await {
        Ok(()) => {
            info!(admin_id = admin.id, department_id = id, profession_id, "profession unlinked");
            done(jar, "Profession removed from department", &back)
        }
        Err(DbError::NotFound) => reject(
            jar,
            "Profession is not assigned to this department",
            &back,
        ),
        Err(err) => fail(jar, err, "unlink profession", &back),
    }
}
