//! Form payloads and the validation shared by the handlers.

use platform_db::{EmployeeFilter, EmployeeInput};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

impl NameForm {
    pub fn name(&self) -> Option<&str> {
        required(&self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox on the registration form.
    pub admin: Option<String>,
}

impl CredentialsForm {
    /// Trimmed name and the untouched password, when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let name = required(&self.name)?;
        if self.password.is_empty() {
            return None;
        }
        Some((name, self.password.as_str()))
    }

    pub fn wants_admin(&self) -> bool {
        self.admin
            .as_deref()
            .is_some_and(|v| matches!(v, "true" | "on" | "1"))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DepartmentChoice {
    pub department_id: Option<String>,
}

impl DepartmentChoice {
    pub fn department_id(&self) -> Option<i32> {
        parse_id(self.department_id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfessionChoice {
    pub profession_id: Option<String>,
}

impl ProfessionChoice {
    pub fn profession_id(&self) -> Option<i32> {
        parse_id(self.profession_id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub salary: String,
    pub department_id: Option<String>,
    pub profession_id: Option<String>,
}

impl EmployeeForm {
    /// Validated input, or the flash message explaining what is missing.
    pub fn validate(&self) -> Result<EmployeeInput, &'static str> {
        let name = required(&self.name).ok_or("Employee name is required")?;
        let salary = parse_salary(&self.salary).ok_or("Salary must be a non-negative whole number")?;
        let department_id =
            parse_id(self.department_id.as_deref()).ok_or("Department is required")?;
        let profession_id =
            parse_id(self.profession_id.as_deref()).ok_or("Profession is required")?;
        Ok(EmployeeInput {
            name: name.to_owned(),
            salary,
            department_id,
            profession_id,
        })
    }
}

/// Raw query string of the public employee list; blank values mean "any".
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeQuery {
    pub department_id: Option<String>,
    pub profession_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

impl EmployeeQuery {
    pub fn filter(&self) -> EmployeeFilter {
        EmployeeFilter {
            department_id: parse_id(self.department_id.as_deref()),
            profession_id: parse_id(self.profession_id.as_deref()),
            search: self.search.as_deref().and_then(required).map(str::to_owned),
        }
    }

    /// Zero-based page; the query string counts from one.
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(|page| page.saturating_sub(1))
            .unwrap_or(0)
    }
}

pub fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn parse_id(raw: Option<&str>) -> Option<i32> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i32>().ok())
        .filter(|id| *id > 0)
}

pub fn parse_salary(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|salary| *salary >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, salary: &str, department: &str, profession: &str) -> EmployeeForm {
        EmployeeForm {
            name: name.into(),
            salary: salary.into(),
            department_id: Some(department.into()),
            profession_id: Some(profession.into()),
        }
    }

    #[test]
    fn blank_names_are_missing() {
        assert_eq!(NameForm { name: "   ".into() }.name(), None);
        assert_eq!(NameForm { name: " Sales ".into() }.name(), Some("Sales"));
    }

    #[test]
    fn credentials_need_both_fields() {
        let form = CredentialsForm {
            name: "ann".into(),
            password: String::new(),
            admin: None,
        };
        assert_eq!(form.credentials(), None);
        let form = CredentialsForm {
            name: " ann ".into(),
            password: " pw ".into(),
            admin: Some("on".into()),
        };
        assert_eq!(form.credentials(), Some(("ann", " pw ")));
        assert!(form.wants_admin());
    }

    #[test]
    fn valid_employee_form_converts() {
        let input = employee(" Ann ", "1500", "2", "3").validate().unwrap();
        assert_eq!(
            input,
            EmployeeInput {
                name: "Ann".into(),
                salary: 1500,
                department_id: 2,
                profession_id: 3,
            }
        );
    }

    #[test]
    fn employee_form_reports_first_problem() {
        assert_eq!(
            employee("", "10", "1", "1").validate(),
            Err("Employee name is required")
        );
        assert_eq!(
            employee("Ann", "-5", "1", "1").validate(),
            Err("Salary must be a non-negative whole number")
        );
        assert_eq!(
            employee("Ann", "10", "", "1").validate(),
            Err("Department is required")
        );
        assert_eq!(
            employee("Ann", "10", "1", "zero").validate(),
            Err("Profession is required")
        );
    }

    #[test]
    fn blank_query_values_mean_any() {
        let query = EmployeeQuery {
            department_id: Some(String::new()),
            profession_id: Some("4".into()),
            search: Some("  ".into()),
            page: Some("3".into()),
        };
        assert_eq!(
            query.filter(),
            EmployeeFilter {
                department_id: None,
                profession_id: Some(4),
                search: None,
            }
        );
        assert_eq!(query.page(), 2);
        assert_eq!(EmployeeQuery::default().page(), 0);
    }
}
