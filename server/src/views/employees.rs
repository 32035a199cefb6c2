use std::fmt::Write as _;

use entity::{departments, professions};
use platform_db::{EmployeeFilter, EmployeePage};
use url::form_urlencoded;

use super::{escape, options};

pub fn employee_list(
    page: &EmployeePage,
    filter: &EmployeeFilter,
    departments: &[departments::Model],
    professions: &[professions::Model],
) -> String {
    let department_options = options(
        departments.iter().map(|d| (d.id, d.name.as_str())),
        filter.department_id,
        Some("All departments"),
    );
    let profession_options = options(
        professions.iter().map(|p| (p.id, p.name.as_str())),
        filter.profession_id,
        Some("All professions"),
    );
    let search = escape(filter.search.as_deref().unwrap_or_default());

    let mut out = format!(
        r#"<form method="get" action="/employees" class="filters">
<select name="department_id">{department_options}</select>
<select name="profession_id">{profession_options}</select>
<input type="search" name="search" value="{search}" placeholder="Name">
<button type="submit">Filter</button>
</form>
"#
    );

    if page.rows.is_empty() {
        out.push_str("<p>No employees match.</p>");
        return out;
    }

    out.push_str(
        "<table>\n<thead><tr><th>Name</th><th>Salary</th><th>Department</th><th>Profession</th></tr></thead>\n<tbody>\n",
    );
    for row in &page.rows {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.name),
            row.salary,
            escape(row.department.as_deref().unwrap_or("-")),
            escape(row.profession.as_deref().unwrap_or("-")),
        );
    }
    out.push_str("</tbody>\n</table>\n");
    out.push_str(&pager(page, filter));
    out
}

fn pager(page: &EmployeePage, filter: &EmployeeFilter) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }
    let mut out = String::from(r#"<nav class="pager">"#);
    for number in 1..=page.total_pages {
        if number == page.page + 1 {
            let _ = write!(out, " <strong>{number}</strong>");
        } else {
            let _ = write!(
                out,
                r#" <a href="{}">{number}</a>"#,
                escape(&page_href(filter, number))
            );
        }
    }
    out.push_str("</nav>");
    out
}

/// Link to page `number` (one-based) keeping the active filters.
fn page_href(filter: &EmployeeFilter, number: u64) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(id) = filter.department_id {
        query.append_pair("department_id", &id.to_string());
    }
    if let Some(id) = filter.profession_id {
        query.append_pair("profession_id", &id.to_string());
    }
    if let Some(search) = filter.search.as_deref() {
        query.append_pair("search", search);
    }
    query.append_pair("page", &number.to_string());
    format!("/employees?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_db::EmployeeRow;

    fn row(id: i32, name: &str) -> EmployeeRow {
        EmployeeRow {
            id,
            name: name.into(),
            salary: 1000,
            department_id: 1,
            profession_id: 1,
            department: Some("R&D".into()),
            profession: None,
        }
    }

    #[test]
    fn page_links_keep_filters() {
        let filter = EmployeeFilter {
            department_id: Some(3),
            profession_id: None,
            search: Some("an na".into()),
        };
        assert_eq!(
            page_href(&filter, 2),
            "/employees?department_id=3&search=an+na&page=2"
        );
    }

    #[test]
    fn rows_render_escaped_with_placeholders() {
        let page = EmployeePage {
            rows: vec![row(1, "Ann <admin>")],
            page: 0,
            total_pages: 1,
            total_items: 1,
        };
        let html = employee_list(&page, &EmployeeFilter::default(), &[], &[]);
        assert!(html.contains("<td>Ann &lt;admin&gt;</td><td>1000</td><td>R&amp;D</td><td>-</td>"));
        assert!(!html.contains("pager"));
    }

    #[test]
    fn pager_marks_current_page() {
        let page = EmployeePage {
            rows: vec![row(1, "Ann")],
            page: 1,
            total_pages: 3,
            total_items: 41,
        };
        let html = employee_list(&page, &EmployeeFilter::default(), &[], &[]);
        assert!(html.contains(" <strong>2</strong>"));
        assert!(html.contains(r#"<a href="/employees?page=3">3</a>"#));
    }
}
