//! Request priority enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority level for an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestPriority {
    /// Low priority.
    Low,
    /// Medium priority (default).
    Medium,
    /// High priority.
    High,
    /// Urgent — surfaced first in inbox views.
    Urgent,
}

impl RequestPriority {
    /// Return the numeric priority (higher = more urgent).
    pub fn numeric_priority(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Urgent => 4,
        }
    }

    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Default for RequestPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for RequestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
