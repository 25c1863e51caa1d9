//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Token cookie max-age in seconds (mirrors the script-readable store).
    #[serde(default = "default_cookie_max_age")]
    pub token_cookie_max_age_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4) required for new passwords.
    #[serde(default = "default_password_score")]
    pub password_min_score: u8,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_cookie_max_age() -> u64 {
    // 30 days, matching the client-side token cookie contract.
    30 * 24 * 60 * 60
}

fn default_password_min() -> usize {
    8
}

fn default_password_score() -> u8 {
    2
}
