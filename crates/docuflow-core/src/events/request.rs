//! Approval-request domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to approval requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestEvent {
    /// A new request entered a department's inbox.
    Submitted {
        /// The request ID.
        request_id: Uuid,
        /// The request title.
        title: String,
        /// The department whose inbox receives it.
        target_department_id: Uuid,
        /// The director it was assigned to, if any.
        assigned_director_id: Option<Uuid>,
    },
    /// A pending request received a terminal action.
    Actioned {
        /// The request ID.
        request_id: Uuid,
        /// The request title.
        title: String,
        /// The action taken (lowercase string form).
        action: String,
        /// Status after the action.
        status: String,
        /// The creator to notify.
        creator_id: Uuid,
        /// The action comment, if one was supplied.
        comment: Option<String>,
    },
}
