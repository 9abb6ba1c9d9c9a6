//! Credential verification, session tokens and the per-request gate

pub mod handlers;
pub mod middleware;
pub mod service;

pub use middleware::{Access, authorize, session_gate};
pub use service::{AuthService, Claims, CredentialError, LoginForm, SessionUser, hash_password};
