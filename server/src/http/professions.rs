use axum::extract::{Form, Path, State};
use axum_extra::extract::cookie::PrivateCookieJar;
use platform_db::DbError;
use tracing::info;

use super::{
    AppState, Page, Redirected, Rendered, done, fail, forms::NameForm, reject, render,
    session::AdminUser,
};
use crate::views::{self, CatalogPage};

const PAGE: CatalogPage = CatalogPage {
    singular: "Profession",
    base: "/professions",
    with_professions: false,
};

pub async fn index(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Page {
    match platform_db::list_professions(&state.pool).await {
        Ok(professions) => {
            let body =
                views::catalog_index(PAGE, professions.iter().map(|p| (p.id, p.name.as_str())));
            Ok(render(jar, Some(&admin), "Professions", body))
        }
        Err(err) => Err(fail(jar, err, "list professions", "/")),
    }
}

pub async fn new_form(AdminUser(admin): AdminUser, jar: PrivateCookieJar) -> Rendered {
    render(
        jar,
        Some(&admin),
        "Create Profession",
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
        return reject(jar, "Profession name is required", "/professions/new");
    };
    match platform_db::create_profession(&state.pool, name).await {
        Ok(profession) => {
            info!(admin_id = admin.id, profession_id = profession.id, "profession created");
            done(jar, "Profession added successfully", PAGE.base)
        }
        Err(err) => fail(jar, err, "create profession", "/professions/new"),
    }
}

pub async fn edit_form(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Page {
    match platform_db::find_profession(&state.pool, id).await {
        Ok(Some(profession)) => Ok(render(
            jar,
            Some(&admin),
            "Edit Profession",
            views::catalog_form(PAGE, Some((profession.id, profession.name.as_str()))),
        )),
        Ok(None) => Err(reject(jar, "Profession not found", PAGE.base)),
        Err(err) => Err(fail(jar, err, "edit profession", PAGE.base)),
    }
}

pub async fn update(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
    Form(form): Form<NameForm>,
) -> Redirected {
    let back = format!("/professions/{id}/edit");
    let Some(name) = form.name() else {
        return reject(jar, "Profession name is required", &back);
    };
    match platform_db::rename_profession(&state.pool, id, name).await {
        Ok(_) => {
            info!(admin_id = admin.id, profession_id = id, "profession renamed");
            done(jar, "Profession updated successfully", PAGE.base)
        }
        Err(DbError::NotFound) => reject(jar, "Profession not found", PAGE.base),
        Err(err) => fail(jar, err, "update profession", &back),
    }
}

pub async fn delete(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(id): Path<i32>,
) -> Redirected {
    match platform_db::delete_profession(&state.pool, id).await {
        Ok(()) => {
            info!(admin_id = admin.id, profession_id = id, "profession deleted");
            done(jar, "Profession deleted successfully", PAGE.base)
        }
        Err(DbError::NotFound) => reject(jar, "Profession not found", PAGE.base),
        Err(DbError::ForeignKey) => reject(jar, "Profession still has employees", PAGE.base),
        Err(err) => fail(jar, err, "delete profession", PAGE.base),
    }
}
