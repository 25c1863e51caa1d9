//! Rules mapping domain events onto notification records.
//!
//! Pure functions: given an event, produce the notifications that should
//! be written. Preference filtering happens in the service afterwards.

use docuflow_core::events::{DomainEvent, EventPayload, FileEvent, RequestEvent};
use docuflow_entity::notification::model::{CreateNotification, NotificationCategory};

/// Translate a domain event into zero or more notifications.
pub fn notifications_for_event(event: &DomainEvent) -> Vec<CreateNotification> {
    match &event.payload {
        EventPayload::File(file_event) => file_notifications(file_event),
        EventPayload::Request(request_event) => request_notifications(request_event),
        // Session events feed the audit log, not the notification feed.
        EventPayload::Session(_) => Vec::new(),
    }
}

fn file_notifications(event: &FileEvent) -> Vec<CreateNotification> {
    match event {
        FileEvent::Shared {
            title, user_ids, ..
        } => user_ids
            .iter()
            .map(|user_id| CreateNotification {
                user_id: *user_id,
                category: NotificationCategory::File,
                title: "File shared with you".to_string(),
                body: format!("\"{title}\" was shared with you for review"),
            })
            .collect(),
        FileEvent::StatusChanged {
            title,
            to,
            owner_id,
            ..
        } => vec![CreateNotification {
            user_id: *owner_id,
            category: NotificationCategory::File,
            title: format!("File {to}"),
            body: format!("\"{title}\" is now {to}"),
        }],
        // Creation and resubmission only concern the actor.
        FileEvent::Created { .. } | FileEvent::Resubmitted { .. } => Vec::new(),
    }
}

fn request_notifications(event: &RequestEvent) -> Vec<CreateNotification> {
    match event {
        RequestEvent::Submitted {
            title,
            assigned_director_id,
            ..
        } => assigned_director_id
            .map(|director_id| CreateNotification {
                user_id: director_id,
                category: NotificationCategory::Request,
                title: "New request in your inbox".to_string(),
                body: format!("\"{title}\" is awaiting your action"),
            })
            .into_iter()
            .collect(),
        RequestEvent::Actioned {
            title,
            status,
            creator_id,
            comment,
            ..
        } => {
            let body = match comment {
                Some(text) if !text.trim().is_empty() => {
                    format!("\"{title}\" was {status}: {text}")
                }
                _ => format!("\"{title}\" was {status}"),
            };
            vec![CreateNotification {
                user_id: *creator_id,
                category: NotificationCategory::Request,
                title: format!("Request {status}"),
                body,
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_share_notifies_each_user_target() {
        let users = vec![Uuid::new_v4(), Uuid::new_v4()];
        let event = DomainEvent::new(
            Some(Uuid::new_v4()),
            EventPayload::File(FileEvent::Shared {
                file_id: Uuid::new_v4(),
                title: "Budget".to_string(),
                user_ids: users.clone(),
                department_ids: vec![Uuid::new_v4()],
            }),
        );
        let notifications = notifications_for_event(&event);
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].user_id, users[0]);
    }

    #[test]
    fn test_action_notifies_creator_with_comment() {
        let creator = Uuid::new_v4();
        let event = DomainEvent::new(
            Some(Uuid::new_v4()),
            EventPayload::Request(RequestEvent::Actioned {
                request_id: Uuid::new_v4(),
                title: "Travel approval".to_string(),
                action: "reject".to_string(),
                status: "rejected".to_string(),
                creator_id: creator,
                comment: Some("Budget exhausted".to_string()),
            }),
        );
        let notifications = notifications_for_event(&event);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, creator);
        assert!(notifications[0].body.contains("Budget exhausted"));
    }

    #[test]
    fn test_session_events_produce_nothing() {
        let event = DomainEvent::new(
            None,
            EventPayload::Session(docuflow_core::events::SessionEvent::LoggedOut {
                session_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
            }),
        );
        assert!(notifications_for_event(&event).is_empty());
    }
}
