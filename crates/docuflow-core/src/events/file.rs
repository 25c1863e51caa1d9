//! File-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to document files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileEvent {
    /// A draft file was created.
    Created {
        /// The file ID.
        file_id: Uuid,
        /// The file title.
        title: String,
    },
    /// A draft file was shared with one or more targets.
    Shared {
        /// The file ID.
        file_id: Uuid,
        /// The file title.
        title: String,
        /// User IDs the file was shared with.
        user_ids: Vec<Uuid>,
        /// Department IDs the file was shared with.
        department_ids: Vec<Uuid>,
    },
    /// A file's status changed (approve, reject, send back, activate).
    StatusChanged {
        /// The file ID.
        file_id: Uuid,
        /// The file title.
        title: String,
        /// Status before the transition (lowercase string form).
        from: String,
        /// Status after the transition.
        to: String,
        /// The owner to notify.
        owner_id: Uuid,
    },
    /// A sent-back file was resubmitted as a draft.
    Resubmitted {
        /// The file ID.
        file_id: Uuid,
        /// The file title.
        title: String,
    },
}
