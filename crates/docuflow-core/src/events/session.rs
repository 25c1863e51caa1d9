//! Session lifecycle events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to authentication sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A user logged in.
    LoggedIn {
        /// The session ID.
        session_id: Uuid,
        /// The user ID.
        user_id: Uuid,
        /// Origin IP address.
        ip_address: String,
    },
    /// A user logged out.
    LoggedOut {
        /// The session ID.
        session_id: Uuid,
        /// The user ID.
        user_id: Uuid,
    },
    /// A session was torn down because its token no longer validated.
    Invalidated {
        /// The session ID.
        session_id: Uuid,
        /// Why the session was invalidated.
        reason: String,
    },
}
