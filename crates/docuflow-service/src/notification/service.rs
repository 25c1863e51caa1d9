//! Notification service — delivery, read state, and preferences.

use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use docuflow_core::error::AppError;
use docuflow_core::events::DomainEvent;
use docuflow_core::types::pagination::{PageRequest, PageResponse};
use docuflow_database::repositories::notification::NotificationRepository;
use docuflow_entity::notification::model::Notification;
use docuflow_entity::notification::preference::NotificationPreference;

use super::rules::notifications_for_event;
use crate::context::RequestContext;

/// Delivers notifications and manages per-user preferences.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notification_repo: Arc<NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notification_repo.find_by_user(ctx.user_id, &page).await
    }

    /// Counts the caller's unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notification_repo.count_unread(ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        if !self
            .notification_repo
            .mark_read(notification_id, ctx.user_id)
            .await?
        {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }

    /// Fetches the caller's preferences, defaulting when none were saved.
    pub async fn get_preferences(
        &self,
        ctx: &RequestContext,
    ) -> Result<NotificationPreference, AppError> {
        Ok(self
            .notification_repo
            .find_preferences(ctx.user_id)
            .await?
            .unwrap_or_else(|| NotificationPreference::default_for_user(ctx.user_id)))
    }

    /// Saves the caller's preferences. Reading them back yields the same
    /// object that was saved.
    pub async fn save_preferences(
        &self,
        ctx: &RequestContext,
        preferences: serde_json::Value,
    ) -> Result<NotificationPreference, AppError> {
        if !preferences.is_object() {
            return Err(AppError::validation(
                "Notification preferences must be an object",
            ));
        }
        self.notification_repo
            .save_preferences(ctx.user_id, &preferences)
            .await
    }

    /// Fans a domain event out into notification rows, honouring each
    /// recipient's category preferences. Best-effort: delivery failures
    /// are logged and never fail the originating operation.
    pub async fn publish(&self, event: &DomainEvent) {
        for notification in notifications_for_event(event) {
            let enabled = match self
                .notification_repo
                .find_preferences(notification.user_id)
                .await
            {
                Ok(Some(prefs)) => prefs.category(notification.category.as_str()).enabled,
                Ok(None) => true,
                Err(e) => {
                    error!(error = %e, "Failed to load preferences; delivering anyway");
                    true
                }
            };

            if !enabled {
                debug!(
                    user_id = %notification.user_id,
                    category = %notification.category.as_str(),
                    "Notification suppressed by preference"
                );
                continue;
            }

            if let Err(e) = self.notification_repo.create(&notification).await {
                error!(error = %e, user_id = %notification.user_id, "Failed to deliver notification");
            }
        }
    }
}
