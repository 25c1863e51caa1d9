//! Approval request status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of an approval request.
///
/// A request sits in the target department's inbox while `Pending`;
/// any action moves it out of the inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting action in the target department's inbox.
    Pending,
    /// Approved by the director/department.
    Approved,
    /// Rejected.
    Rejected,
    /// Returned to the creator for revision.
    SentBack,
    /// Parked until the signature requirement is satisfied.
    AwaitingSignature,
}

impl RequestStatus {
    /// Whether the request is still awaiting action.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this status removes the request from the inbox.
    pub fn leaves_inbox(&self) -> bool {
        !self.is_pending()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::SentBack => "sent_back",
            Self::AwaitingSignature => "awaiting_signature",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = docuflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "sent_back" => Ok(Self::SentBack),
            "awaiting_signature" => Ok(Self::AwaitingSignature),
            _ => Err(docuflow_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}
