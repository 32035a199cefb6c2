//! Server-rendered HTML.
//!
//! Every page is a body fragment wrapped by [`layout`]; all interpolated
//! values go through [`escape`].

mod admin;
mod auth;
mod catalog;
mod employees;

use std::fmt::Write as _;

use axum::response::Html;
use platform_authn::Principal;

use crate::http::flash::{FlashLevel, FlashMessage};

pub use admin::{employee_department_step, employee_profession_step, panel};
pub use auth::{home, login, register};
pub use catalog::{CatalogPage, catalog_form, catalog_index, department_professions};
pub use employees::employee_list;

/// Per-request page frame: title, nav state, pending flash messages.
pub struct Chrome<'a> {
    pub title: &'a str,
    pub viewer: Option<&'a Principal>,
    pub flashes: &'a [FlashMessage],
}

pub fn layout(chrome: &Chrome<'_>, body: &str) -> Html<String> {
    let mut nav = String::from(r#"<a href="/">Home</a> <a href="/employees">Employees</a>"#);
    match chrome.viewer {
        Some(user) => {
            if user.is_admin {
                nav.push_str(
                    r#" <a href="/admin">Admin</a> <a href="/departments">Departments</a> <a href="/professions">Professions</a>"#,
                );
            }
            let _ = write!(
                nav,
                r#" <span class="user">{}</span> <a href="/logout">Log out</a>"#,
                escape(&user.name)
            );
        }
        None => nav.push_str(r#" <a href="/login">Log in</a> <a href="/register">Register</a>"#),
    }

    let mut flashes = String::new();
    for flash in chrome.flashes {
        let class = match flash.level {
            FlashLevel::Success => "flash success",
            FlashLevel::Error => "flash error",
        };
        let _ = write!(
            flashes,
            r#"<div class="{class}">{}</div>"#,
            escape(&flash.text)
        );
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{flashes}
{body}
</main>
</body>
</html>
"#,
        title = escape(chrome.title),
    ))
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `<option>` list with an optional leading blank entry.
fn options<'a>(
    items: impl IntoIterator<Item = (i32, &'a str)>,
    selected: Option<i32>,
    blank: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(label) = blank {
        let _ = write!(out, r#"<option value="">{}</option>"#, escape(label));
    }
    for (id, name) in items {
        let marker = if selected == Some(id) { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{id}"{marker}>{}</option>"#,
            escape(name)
        );
    }
    out
}

/// A single-button form; deletes are POSTs.
fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="{}" class="inline"><button type="submit">{}</button></form>"#,
        escape(action),
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b class="x">Tom & 'Jerry'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn layout_shows_admin_links_only_to_admins() {
        let admin = Principal {
            id: 1,
            name: "root".into(),
            is_admin: true,
        };
        let user = Principal {
            is_admin: false,
            ..admin.clone()
        };
        let page = |viewer| {
            layout(
                &Chrome {
                    title: "T",
                    viewer,
                    flashes: &[],
                },
                "",
            )
            .0
        };
        assert!(page(Some(&admin)).contains(r#"href="/departments""#));
        assert!(!page(Some(&user)).contains(r#"href="/departments""#));
        assert!(page(None).contains(r#"href="/login""#));
    }

    #[test]
    fn flashes_render_with_their_level() {
        let flashes = [FlashMessage {
            level: FlashLevel::Error,
            text: "Department name is required".into(),
        }];
        let html = layout(
            &Chrome {
                title: "Create Department",
                viewer: None,
                flashes: &flashes,
            },
            "",
        )
        .0;
        assert!(html.contains(r#"<div class="flash error">Department name is required</div>"#));
    }

    #[test]
    fn options_mark_the_selection() {
        let html = options([(1, "A"), (2, "B")], Some(2), Some("All"));
        assert_eq!(
            html,
            r#"<option value="">All</option><option value="1">A</option><option value="2" selected>B</option>"#
        );
    }
}
