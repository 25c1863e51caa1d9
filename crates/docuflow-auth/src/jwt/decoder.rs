//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use docuflow_core::config::auth::AuthConfig;
use docuflow_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens.
///
/// Token validity alone is necessary but not sufficient for access: the
/// session row must also still be active, which [`crate::SessionManager`]
/// checks after decoding.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::authentication(format!("Invalid or expired token: {e}")))?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use docuflow_entity::user::UserRole;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_access_ttl_minutes: 15,
            jwt_refresh_ttl_hours: 24,
            token_cookie_max_age_seconds: 2_592_000,
            password_min_length: 8,
            password_min_score: 2,
        }
    }

    #[test]
    fn test_round_trip_access_token() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let pair = encoder
            .generate_token_pair(user_id, session_id, UserRole::Director, "dir@example.com")
            .unwrap();

        let claims = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.session_id(), session_id);
        assert_eq!(claims.role, UserRole::Director);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let pair = encoder
            .generate_token_pair(
                Uuid::new_v4(),
                Uuid::new_v4(),
                UserRole::Department,
                "user@example.com",
            )
            .unwrap();

        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&config());
        let mut other = config();
        other.jwt_secret = "different-secret".to_string();
        let decoder = JwtDecoder::new(&other);

        let pair = encoder
            .generate_token_pair(
                Uuid::new_v4(),
                Uuid::new_v4(),
                UserRole::Admin,
                "admin@example.com",
            )
            .unwrap();

        assert!(decoder.decode_access_token(&pair.access_token).is_err());
    }
}
