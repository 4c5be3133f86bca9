//! NG-Drive Auth Library
//!
//! This crate provides the authentication collaborator contract
//! (`AuthProvider`), a file-backed local provider, and the `SessionGate`
//! that decides whether the file-management surface is reachable.

pub mod error;
pub mod gate;
pub mod local;
pub mod models;
pub mod password;
pub mod traits;

// Re-export commonly used types
pub use error::{AuthError, AuthResult};
pub use gate::{SessionGate, SessionState};
pub use local::LocalAuthProvider;
pub use models::{AuthEvent, Credentials, Session, SignUpOutcome, User};
pub use traits::AuthProvider;
