//! Actions a director or department user can take on a pending request.

use serde::{Deserialize, Serialize};
use std::fmt;

use docuflow_core::AppError;

use super::status::RequestStatus;

/// An action applied to a pending approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    /// Approve the request.
    Approve,
    /// Reject the request. Requires a comment.
    Reject,
    /// Return the request to its creator for revision. Requires a comment.
    #[serde(rename = "sendback")]
    SendBack,
    /// Require a signature before final approval. Requires a comment.
    #[serde(rename = "signature")]
    RequestSignature,
}

impl RequestAction {
    /// Whether this action requires a non-empty comment.
    ///
    /// Approve is the only action where the comment may be empty.
    pub fn requires_comment(&self) -> bool {
        !matches!(self, Self::Approve)
    }

    /// The status a pending request moves to when this action succeeds.
    pub fn resulting_status(&self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
            Self::SendBack => RequestStatus::SentBack,
            Self::RequestSignature => RequestStatus::AwaitingSignature,
        }
    }

    /// Validate the comment supplied for this action.
    ///
    /// Rejects missing or whitespace-only comments for every action except
    /// approve. Fails before any database write.
    pub fn validate_comment(&self, comment: Option<&str>) -> Result<(), AppError> {
        if !self.requires_comment() {
            return Ok(());
        }
        match comment {
            Some(text) if !text.trim().is_empty() => Ok(()),
            _ => Err(AppError::validation(format!(
                "A comment is required to {self} a request"
            ))),
        }
    }

    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::SendBack => "sendback",
            Self::RequestSignature => "signature",
        }
    }
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_required_except_approve() {
        assert!(!RequestAction::Approve.requires_comment());
        assert!(RequestAction::Reject.requires_comment());
        assert!(RequestAction::SendBack.requires_comment());
        assert!(RequestAction::RequestSignature.requires_comment());
    }

    #[test]
    fn test_blank_comment_rejected() {
        assert!(RequestAction::Reject.validate_comment(None).is_err());
        assert!(RequestAction::Reject.validate_comment(Some("")).is_err());
        assert!(RequestAction::SendBack.validate_comment(Some("   ")).is_err());
        assert!(
            RequestAction::RequestSignature
                .validate_comment(Some("\t\n"))
                .is_err()
        );
    }

    #[test]
    fn test_approve_allows_empty_comment() {
        assert!(RequestAction::Approve.validate_comment(None).is_ok());
        assert!(RequestAction::Approve.validate_comment(Some("")).is_ok());
    }

    #[test]
    fn test_resulting_status_leaves_inbox() {
        for action in [
            RequestAction::Approve,
            RequestAction::Reject,
            RequestAction::SendBack,
            RequestAction::RequestSignature,
        ] {
            assert!(action.resulting_status().leaves_inbox());
        }
    }
}
