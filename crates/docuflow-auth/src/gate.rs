//! Role gating decisions and the route gating rule table.
//!
//! Both checks are pure and synchronous: they run against already-loaded
//! session state and never touch the network. The same decisions drive the
//! API middleware here and the client's page-level gating.

use docuflow_entity::user::UserRole;

/// Paths reachable without a session.
const PUBLIC_PATHS: [&str; 2] = ["/", "/login"];

/// The authenticated landing area.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Proceed with the requested path.
    Allow,
    /// No valid session — go to the login entry point.
    RedirectToLogin,
    /// Session present but the path is not for this state/role — go to the
    /// authenticated landing area (silent downgrade, never an error page).
    RedirectToDashboard,
}

/// Evaluates access decisions from session state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    /// Creates a new gate.
    pub fn new() -> Self {
        Self
    }

    /// Per-action role check: is the session's role in the required set?
    ///
    /// `None` means no session is present at all.
    pub fn authorize(&self, role: Option<UserRole>, required: &[UserRole]) -> GateDecision {
        match role {
            None => GateDecision::RedirectToLogin,
            Some(role) if required.is_empty() || required.contains(&role) => GateDecision::Allow,
            Some(_) => GateDecision::RedirectToDashboard,
        }
    }

    /// Route-level rule table evaluated on every request from the token
    /// cookie alone:
    ///
    /// | condition | action |
    /// |---|---|
    /// | public path, no token | allow |
    /// | private path, no token | redirect to login |
    /// | login or home with token | redirect to dashboard |
    /// | otherwise | allow |
    pub fn evaluate_route(&self, path: &str, has_token: bool) -> GateDecision {
        let is_public = PUBLIC_PATHS.contains(&path);

        if !has_token {
            if is_public {
                return GateDecision::Allow;
            }
            return GateDecision::RedirectToLogin;
        }

        if is_public {
            return GateDecision::RedirectToDashboard;
        }

        GateDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_redirects_to_login() {
        let gate = AccessGate::new();
        assert_eq!(
            gate.authorize(None, &[UserRole::Admin]),
            GateDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_wrong_role_downgrades_silently() {
        let gate = AccessGate::new();
        for role in [UserRole::Director, UserRole::Department] {
            assert_eq!(
                gate.authorize(Some(role), &[UserRole::Admin]),
                GateDecision::RedirectToDashboard
            );
        }
    }

    #[test]
    fn test_matching_role_allowed() {
        let gate = AccessGate::new();
        assert_eq!(
            gate.authorize(Some(UserRole::Admin), &[UserRole::Admin]),
            GateDecision::Allow
        );
        assert_eq!(
            gate.authorize(Some(UserRole::Department), &[]),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_route_table() {
        let gate = AccessGate::new();

        // Public paths without a token are reachable.
        assert_eq!(gate.evaluate_route("/", false), GateDecision::Allow);
        assert_eq!(gate.evaluate_route("/login", false), GateDecision::Allow);

        // Private paths without a token bounce to login.
        assert_eq!(
            gate.evaluate_route("/dashboard", false),
            GateDecision::RedirectToLogin
        );
        assert_eq!(
            gate.evaluate_route("/admin/users", false),
            GateDecision::RedirectToLogin
        );

        // Authenticated visitors skip the public entry points.
        assert_eq!(
            gate.evaluate_route("/login", true),
            GateDecision::RedirectToDashboard
        );
        assert_eq!(
            gate.evaluate_route("/", true),
            GateDecision::RedirectToDashboard
        );

        // Everything else with a token proceeds.
        assert_eq!(gate.evaluate_route("/dashboard", true), GateDecision::Allow);
    }
}
