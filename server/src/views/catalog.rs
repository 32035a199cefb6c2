//! Department and profession screens; both are plain named lists.

use std::fmt::Write as _;

use entity::professions;

use super::{escape, options, post_button};

/// Labels and URLs distinguishing the two catalogs.
#[derive(Clone, Copy, Debug)]
pub struct CatalogPage {
    pub singular: &'static str,
    pub base: &'static str,
    /// Departments also link to their profession list.
    pub with_professions: bool,
}

pub fn catalog_index<'a>(
    page: CatalogPage,
    items: impl IntoIterator<Item = (i32, &'a str)>,
) -> String {
    let mut out = format!(
        r#"<p><a href="{base}/new">Add {noun}</a></p>
"#,
        base = page.base,
        noun = page.singular.to_lowercase(),
    );
    let mut rows = String::new();
    for (id, name) in items {
        let extra = if page.with_professions {
            format!(r#" <a href="{}/{id}/professions">Professions</a>"#, page.base)
        } else {
            String::new()
        };
        let _ = writeln!(
            rows,
            r#"<tr><td>{}</td><td><a href="{base}/{id}/edit">Edit</a>{extra} {}</td></tr>"#,
            escape(name),
            post_button(&format!("{}/{id}/delete", page.base), "Delete"),
            base = page.base,
        );
    }
    if rows.is_empty() {
        let _ = write!(out, "<p>No {}s yet.</p>", page.singular.to_lowercase());
    } else {
        let _ = write!(
            out,
            "<table>\n<thead><tr><th>Name</th><th></th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n"
        );
    }
    out
}

/// Create form when `existing` is `None`, rename form otherwise.
pub fn catalog_form(page: CatalogPage, existing: Option<(i32, &str)>) -> String {
    let (action, value, label) = match existing {
        Some((id, name)) => (format!("{}/{id}/edit", page.base), escape(name), "Save"),
        None => (format!("{}/new", page.base), String::new(), "Create"),
    };
    format!(
        r#"<form method="post" action="{action}">
<label>{singular} name <input type="text" name="name" value="{value}"></label>
<button type="submit">{label}</button>
</form>
<p><a href="{base}">Back</a></p>"#,
        singular = page.singular,
        base = page.base,
    )
}

pub fn department_professions(
    department_id: i32,
    linked: &[professions::Model],
    available: &[professions::Model],
) -> String {
    let mut out = String::new();
    if linked.is_empty() {
        out.push_str("<p>No professions are assigned to this department yet.</p>\n");
    } else {
        out.push_str("<ul>\n");
        for profession in linked {
            let _ = writeln!(
                out,
                "<li>{} {}</li>",
                escape(&profession.name),
                post_button(
                    &format!(
                        "/departments/{department_id}/professions/{}/delete",
                        profession.id
                    ),
                    "Remove"
                ),
            );
        }
        out.push_str("</ul>\n");
    }
    if !available.is_empty() {
        let choices = options(
            available.iter().map(|p| (p.id, p.name.as_str())),
            None,
            None,
        );
        let _ = write!(
            out,
            r#"<form method="post" action="/departments/{department_id}/professions">
<select name="profession_id">{choices}</select>
<button type="submit">Add profession</button>
</form>
"#
        );
    }
    out.push_str(r#"<p><a href="/departments">Back</a></p>"#);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPARTMENTS: CatalogPage = CatalogPage {
        singular: "Department",
        base: "/departments",
        with_professions: true,
    };

    #[test]
    fn index_links_edit_delete_and_professions() {
        let html = catalog_index(DEPARTMENTS, [(4, "Sales")]);
        assert!(html.contains(r#"href="/departments/4/edit""#));
        assert!(html.contains(r#"action="/departments/4/delete""#));
        assert!(html.contains(r#"href="/departments/4/professions""#));
    }

    #[test]
    fn empty_index_says_so() {
        assert!(catalog_index(DEPARTMENTS, std::iter::empty()).contains("No departments yet."));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let html = catalog_form(DEPARTMENTS, Some((2, "R&D")));
        assert!(html.contains(r#"action="/departments/2/edit""#));
        assert!(html.contains(r#"value="R&amp;D""#));
    }
}
