//! User signature value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a signature was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "signature_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    /// Drawn on a canvas by the user.
    Drawn,
    /// Uploaded as an image.
    Uploaded,
}

/// A user's stored signature, used to satisfy signature requirements
/// on files and requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignature {
    /// Whether the signature is enabled for use.
    pub enabled: bool,
    /// How the signature was captured.
    pub kind: SignatureKind,
    /// Encoded signature payload (data URL).
    pub data: String,
    /// When the signature was last updated.
    pub updated_at: DateTime<Utc>,
}
