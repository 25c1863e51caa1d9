//! User role enumeration and the centralized role lookup table.
//!
//! Every role check in the application goes through this module. UI-facing
//! metadata (theme, landing area) and permission predicates live in one
//! place so that no caller re-derives behavior from role strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in DocuFlow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full system administrator. Manages users and departments.
    Admin,
    /// Oversees a single department; final approver for its files and requests.
    Director,
    /// Department-scoped user; originator of most files and requests.
    Department,
}

/// Static per-role metadata consumed by clients and the route gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoleProfile {
    /// Theme key clients use to style role-specific views.
    pub theme: &'static str,
    /// Path of the authenticated landing area for this role.
    pub landing_path: &'static str,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may manage users and departments.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may take approval actions on files and requests.
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Admin | Self::Director | Self::Department)
    }

    /// Whether this role is the final approver for a department.
    pub fn is_final_approver(&self) -> bool {
        matches!(self, Self::Director)
    }

    /// Whether accounts with this role should carry a department reference.
    pub fn requires_department(&self) -> bool {
        matches!(self, Self::Director | Self::Department)
    }

    /// Return the static profile for this role.
    pub fn profile(&self) -> RoleProfile {
        match self {
            Self::Admin => RoleProfile {
                theme: "admin",
                landing_path: "/dashboard",
            },
            Self::Director => RoleProfile {
                theme: "director",
                landing_path: "/dashboard",
            },
            Self::Department => RoleProfile {
                theme: "department",
                landing_path: "/dashboard",
            },
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Director => "director",
            Self::Department => "department",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = docuflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "director" => Ok(Self::Director),
            "department" => Ok(Self::Department),
            _ => Err(docuflow_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, director, department"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_predicates() {
        assert!(UserRole::Admin.can_manage_users());
        assert!(!UserRole::Director.can_manage_users());
        assert!(!UserRole::Department.can_manage_users());
        assert!(UserRole::Director.is_final_approver());
    }

    #[test]
    fn test_department_requirement() {
        assert!(!UserRole::Admin.requires_department());
        assert!(UserRole::Director.requires_department());
        assert!(UserRole::Department.requires_department());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("DIRECTOR".parse::<UserRole>().unwrap(), UserRole::Director);
        assert!("manager".parse::<UserRole>().is_err());
    }
}
