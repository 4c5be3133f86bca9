//! Authentication abstraction trait
//!
//! Mirrors the contract the front end needs from a managed authentication
//! provider: session resolution, password sign-in, sign-up, sign-out, and a
//! session-change subscription. Dropping the subscription receiver is the
//! unsubscribe.

use crate::error::AuthResult;
use crate::models::{AuthEvent, Credentials, Session, SignUpOutcome};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Authentication provider abstraction
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, if any. Expired sessions are reported as `None`.
    async fn get_session(&self) -> AuthResult<Option<Session>>;

    /// Sign in with email and password.
    async fn sign_in_with_password(&self, credentials: Credentials) -> AuthResult<Session>;

    /// Register a new account. Depending on the provider this either signs
    /// in immediately or requires out-of-band confirmation.
    async fn sign_up(&self, credentials: Credentials) -> AuthResult<SignUpOutcome>;

    /// End the current session.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Subscribe to session-change notifications.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
