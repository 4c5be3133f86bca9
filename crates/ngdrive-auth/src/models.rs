use crate::error::{AuthError, AuthResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// An authentication session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires) if expires <= now)
    }
}

/// Email/password credentials entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Pre-call validation: both fields are required. Performed before any
    /// provider call so a half-filled form never reaches the collaborator.
    pub fn validate(&self) -> AuthResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        Ok(())
    }
}

/// Session-change notification pushed by the auth provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
}

/// Outcome of a sign-up request.
///
/// Providers that require email confirmation return
/// `ConfirmationRequired`; the local provider signs in immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationRequired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("a@b.c", "secret").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            Credentials::new("a@b.c", "").validate(),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            Credentials::new("   ", "secret").validate(),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.c".to_string(),
        };
        let mut session = Session {
            user,
            access_token: "token".to_string(),
            expires_at: Some(now + Duration::hours(1)),
        };
        assert!(!session.is_expired(now));

        session.expires_at = Some(now - Duration::seconds(1));
        assert!(session.is_expired(now));

        session.expires_at = None;
        assert!(!session.is_expired(now));
    }
}
