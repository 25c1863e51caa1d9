//! Document file status enumeration and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a document file.
///
/// The permitted transitions:
///
/// ```text
/// draft ──share──▶ pending ──▶ approved ──publish──▶ active
///   ▲                 │
///   │                 ├──▶ rejected
///   └───resubmit──────┴──▶ sent_back
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Newly created, visible only to the creator. The only shareable state.
    Draft,
    /// Shared and awaiting an approval decision.
    Pending,
    /// Approved by the responsible director/department.
    Approved,
    /// Rejected. Terminal.
    Rejected,
    /// Returned to the creator for revision; re-enters draft on resubmit.
    SentBack,
    /// Published and in active circulation. Terminal.
    Active,
}

impl FileStatus {
    /// Whether a file in this status may be shared.
    pub fn can_share(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Whether a file in this status is awaiting an approval decision.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this status ends the workflow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Active)
    }

    /// Whether the transition `self -> to` is permitted.
    ///
    /// A sent-back file must re-enter draft; it can never move to
    /// approved directly.
    pub fn can_transition_to(&self, to: FileStatus) -> bool {
        matches!(
            (self, to),
            (Self::Draft, Self::Pending)
                | (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Pending, Self::SentBack)
                | (Self::SentBack, Self::Draft)
                | (Self::Approved, Self::Active)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::SentBack => "sent_back",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = docuflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "sent_back" => Ok(Self::SentBack),
            "active" => Ok(Self::Active),
            _ => Err(docuflow_core::AppError::validation(format!(
                "Invalid file status: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_draft_is_shareable() {
        assert!(FileStatus::Draft.can_share());
        for status in [
            FileStatus::Pending,
            FileStatus::Approved,
            FileStatus::Rejected,
            FileStatus::SentBack,
            FileStatus::Active,
        ] {
            assert!(!status.can_share(), "{status} must not be shareable");
        }
    }

    #[test]
    fn test_pending_decisions() {
        assert!(FileStatus::Pending.can_transition_to(FileStatus::Approved));
        assert!(FileStatus::Pending.can_transition_to(FileStatus::Rejected));
        assert!(FileStatus::Pending.can_transition_to(FileStatus::SentBack));
        assert!(!FileStatus::Pending.can_transition_to(FileStatus::Active));
    }

    #[test]
    fn test_sent_back_must_reenter_draft() {
        assert!(FileStatus::SentBack.can_transition_to(FileStatus::Draft));
        assert!(!FileStatus::SentBack.can_transition_to(FileStatus::Approved));
        assert!(!FileStatus::SentBack.can_transition_to(FileStatus::Pending));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for to in [
            FileStatus::Draft,
            FileStatus::Pending,
            FileStatus::Approved,
            FileStatus::SentBack,
            FileStatus::Active,
        ] {
            assert!(!FileStatus::Rejected.can_transition_to(to));
            assert!(!FileStatus::Active.can_transition_to(to));
        }
    }
}
