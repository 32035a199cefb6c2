//! Platform authentication helpers.
//!
//! Local name/password accounts hashed with argon2, plus the [`Principal`]
//! carried by a logged-in session and the admin check guarding the panel.

mod password;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use password::{PasswordError, hash_password, verify_password};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("permission denied for {name}")]
    Denied { name: String },
}

/// The user bound to the current session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Principal {
    pub id: i32,
    pub name: String,
    pub is_admin: bool,
}

impl Principal {
    pub fn require_admin(&self) -> Result<(), AccessError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AccessError::Denied {
                name: self.name.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(is_admin: bool) -> Principal {
        Principal {
            id: 7,
            name: "dana".into(),
            is_admin,
        }
    }

    #[test]
    fn admins_pass_the_gate() {
        assert_eq!(principal(true).require_admin(), Ok(()));
    }

    #[test]
    fn regular_users_are_denied() {
        let err = principal(false).require_admin().unwrap_err();
        assert_eq!(err.to_string(), "permission denied for dana");
    }
}
