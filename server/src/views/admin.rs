use std::fmt::Write as _;

use entity::{departments, employees, professions};
use platform_db::EmployeeRow;

use super::{escape, options, post_button};

pub fn panel(rows: &[EmployeeRow]) -> String {
    let mut out = String::from(
        r#"<p><a href="/admin/employees/new">Add employee</a> | <a href="/departments">Departments</a> | <a href="/professions">Professions</a></p>
"#,
    );
    if rows.is_empty() {
        out.push_str("<p>No employees yet.</p>");
        return out;
    }
    out.push_str(
        "<table>\n<thead><tr><th>Name</th><th>Salary</th><th>Department</th><th>Profession</th><th></th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        let _ = writeln!(
            out,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="/admin/employees/{id}/edit">Edit</a> {}</td></tr>"#,
            escape(&row.name),
            row.salary,
            escape(row.department.as_deref().unwrap_or("-")),
            escape(row.profession.as_deref().unwrap_or("-")),
            post_button(&format!("/admin/employees/{}/delete", row.id), "Delete"),
            id = row.id,
        );
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Step one of create/edit: pick the department.
pub fn employee_department_step(
    action: &str,
    departments: &[departments::Model],
    selected: Option<i32>,
) -> String {
    if departments.is_empty() {
        return r#"<p>Create a <a href="/departments/new">department</a> first.</p>"#.to_string();
    }
    let choices = options(
        departments.iter().map(|d| (d.id, d.name.as_str())),
        selected,
        None,
    );
    format!(
        r#"<form method="post" action="{}">
<label>Department <select name="department_id">{choices}</select></label>
<button type="submit">Next</button>
</form>
<p><a href="/admin">Back</a></p>"#,
        escape(action)
    )
}

/// Step two: details plus the professions available in the chosen department.
pub fn employee_profession_step(
    action: &str,
    department: &departments::Model,
    professions: &[professions::Model],
    existing: Option<&employees::Model>,
) -> String {
    if professions.is_empty() {
        return format!(
            r#"<p>No professions are available in {}. <a href="/departments/{}/professions">Assign some</a> first.</p>"#,
            escape(&department.name),
            department.id
        );
    }
    let choices = options(
        professions.iter().map(|p| (p.id, p.name.as_str())),
        existing.map(|e| e.profession_id),
        None,
    );
    let name = existing.map(|e| escape(&e.name)).unwrap_or_default();
    let salary = existing.map(|e| e.salary.to_string()).unwrap_or_default();
    format!(
        r#"<p>Department: <strong>{department_name}</strong></p>
<form method="post" action="{action}">
<input type="hidden" name="department_id" value="{department_id}">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Salary <input type="number" name="salary" min="0" value="{salary}" required></label>
<label>Profession <select name="profession_id">{choices}</select></label>
<button type="submit">Save</button>
</form>
<p><a href="/admin">Back</a></p>"#,
        department_name = escape(&department.name),
        action = escape(action),
        department_id = department.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn department() -> departments::Model {
        departments::Model {
            id: 3,
            name: "Ops".into(),
        }
    }

    #[test]
    fn profession_step_offers_only_given_professions() {
        let professions = vec![professions::Model {
            id: 9,
            name: "Engineer".into(),
        }];
        let html = employee_profession_step("/admin/employees", &department(), &professions, None);
        assert!(html.contains(r#"<input type="hidden" name="department_id" value="3">"#));
        assert!(html.contains(r#"<option value="9">Engineer</option>"#));
    }

    #[test]
    fn profession_step_without_choices_points_to_assignment() {
        let html = employee_profession_step("/admin/employees", &department(), &[], None);
        assert!(html.contains(r#"href="/departments/3/professions""#));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn edit_step_is_prefilled() {
        let professions = vec![professions::Model {
            id: 9,
            name: "Engineer".into(),
        }];
        let employee = employees::Model {
            id: 5,
            name: "Ann".into(),
            salary: 4200,
            department_id: 3,
            profession_id: 9,
        };
        let html = employee_profession_step(
            "/admin/employees/5",
            &department(),
            &professions,
            Some(&employee),
        );
        assert!(html.contains(r#"value="Ann""#));
        assert!(html.contains(r#"value="4200""#));
        assert!(html.contains(r#"<option value="9" selected>Engineer</option>"#));
    }
}
