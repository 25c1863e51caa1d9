//! User domain entities.

pub mod model;
pub mod role;
pub mod signature;

pub use model::{CreateUser, UpdateUser, User};
pub use role::{RoleProfile, UserRole};
pub use signature::{SignatureKind, UserSignature};
