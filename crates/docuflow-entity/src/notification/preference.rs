//! Notification preference entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user notification delivery preferences.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationPreference {
    /// The user these preferences belong to.
    pub user_id: Uuid,
    /// Preferences as a JSON object.
    ///
    /// Structure:
    /// ```json
    /// {
    ///   "file": { "enabled": true, "email": false },
    ///   "request": { "enabled": true, "email": true },
    ///   "session": { "enabled": true, "email": false },
    ///   "system": { "enabled": true, "email": false }
    /// }
    /// ```
    pub preferences: serde_json::Value,
    /// When preferences were last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Preference settings for a single notification category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPreference {
    /// Whether this category is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether to deliver via email.
    #[serde(default)]
    pub email: bool,
}

impl NotificationPreference {
    /// Create default preferences for a user.
    pub fn default_for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            preferences: serde_json::json!({
                "file": CategoryPreference::default(),
                "request": CategoryPreference::default(),
                "session": CategoryPreference::default(),
                "system": CategoryPreference::default(),
            }),
            updated_at: Some(Utc::now()),
        }
    }

    /// Look up the preference for one category, falling back to defaults
    /// when the stored blob omits it.
    pub fn category(&self, key: &str) -> CategoryPreference {
        self.preferences
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

impl Default for CategoryPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            email: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_round_trips() {
        let prefs = NotificationPreference {
            user_id: Uuid::new_v4(),
            preferences: serde_json::json!({
                "file": { "enabled": false, "email": true },
                "request": { "enabled": true, "email": false },
            }),
            updated_at: Some(Utc::now()),
        };

        // Simulated persist + reload through the JSON column.
        let stored = serde_json::to_string(&prefs.preferences).unwrap();
        let loaded: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(loaded, prefs.preferences);
    }

    #[test]
    fn test_missing_category_falls_back_to_default() {
        let prefs = NotificationPreference::default_for_user(Uuid::new_v4());
        assert_eq!(prefs.category("nonexistent"), CategoryPreference::default());
    }

    #[test]
    fn test_disabled_category_read_back() {
        let user_id = Uuid::new_v4();
        let mut prefs = NotificationPreference::default_for_user(user_id);
        prefs.preferences["file"]["enabled"] = serde_json::json!(false);
        assert!(!prefs.category("file").enabled);
        assert!(prefs.category("request").enabled);
    }
}
