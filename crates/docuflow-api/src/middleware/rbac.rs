//! Role-based route guarding.
//!
//! Handlers call these before touching any data, so an unauthorized
//! session is turned away before the first admin query runs.

use docuflow_auth::gate::GateDecision;
use docuflow_core::error::AppError;
use docuflow_entity::user::UserRole;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// Checks that the authenticated user's role is in the required set.
pub fn require_roles(
    state: &AppState,
    auth: &AuthUser,
    required: &[UserRole],
) -> Result<(), AppError> {
    match state.access_gate.authorize(Some(auth.role), required) {
        GateDecision::Allow => Ok(()),
        GateDecision::RedirectToLogin => Err(AppError::authentication("Authentication required")),
        GateDecision::RedirectToDashboard => {
            Err(AppError::authorization("You do not have access to this area"))
        }
    }
}

/// Checks that the authenticated user has the admin role.
pub fn require_admin(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    require_roles(state, auth, &[UserRole::Admin])
}

/// Checks that the authenticated user may take approval decisions.
pub fn require_approver(state: &AppState, auth: &AuthUser) -> Result<(), AppError> {
    require_roles(
        state,
        auth,
        &[UserRole::Admin, UserRole::Director, UserRole::Department],
    )
}
