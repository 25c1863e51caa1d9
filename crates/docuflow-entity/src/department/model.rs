//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A department within the organization.
///
/// Each department has at most one assigned director; the assignment
/// operation only offers directors that hold no department yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    /// Unique department identifier.
    pub id: Uuid,
    /// Department display name.
    pub name: String,
    /// Short unique identifier (uppercased, e.g. `"FIN"`).
    pub code: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the department is active.
    pub is_active: bool,
    /// The director assigned to this department, if any.
    pub director_id: Option<Uuid>,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
    /// When the department was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Whether a director is currently assigned.
    pub fn has_director(&self) -> bool {
        self.director_id.is_some()
    }
}

/// Data required to create a new department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    /// Department name.
    pub name: String,
    /// Short unique code.
    pub code: String,
    /// Description.
    pub description: Option<String>,
}

/// Data for updating an existing department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepartment {
    /// The department ID to update.
    pub id: Uuid,
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}
