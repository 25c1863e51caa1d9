//! # docuflow-auth
//!
//! Authentication, authorization, and session management for DocuFlow.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing and policy enforcement
//! - `session` — Session lifecycle management (login, refresh, logout)
//! - `gate` — Role gating decisions and the route gating rule table

pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;

pub use gate::{AccessGate, GateDecision};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{SessionManager, SessionStore};
