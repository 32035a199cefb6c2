//! Entity models for the employee management schema.

pub mod department_professions;
pub mod departments;
pub mod employees;
pub mod professions;
pub mod sessions;
pub mod users;
