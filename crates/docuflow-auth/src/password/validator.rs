//! Password policy enforcement for new passwords.

use docuflow_core::config::auth::AuthConfig;
use docuflow_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
    /// Minimum zxcvbn score (0-4).
    min_score: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: config.password_min_score.min(4),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < self.score_threshold() {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password.",
            ));
        }

        Ok(())
    }

    /// Map the configured numeric score onto the zxcvbn scale.
    fn score_threshold(&self) -> zxcvbn::Score {
        match self.min_score {
            0 => zxcvbn::Score::Zero,
            1 => zxcvbn::Score::One,
            2 => zxcvbn::Score::Two,
            3 => zxcvbn::Score::Three,
            _ => zxcvbn::Score::Four,
        }
    }

    /// Validates that a confirmation field matches the new password.
    pub fn validate_confirmation(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::validation("Passwords do not match"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator {
            min_length: 8,
            min_score: 2,
        }
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(validator().validate("Ab1!").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validator().validate("quiet-harbor-lantern-42").is_ok());
    }

    #[test]
    fn test_confirmation_mismatch() {
        let v = validator();
        assert!(v.validate_confirmation("one", "two").is_err());
        assert!(v.validate_confirmation("same", "same").is_ok());
    }
}
