use crate::error::{AuthError, AuthResult};
use crate::models::{AuthEvent, Credentials, Session, SignUpOutcome, User};
use crate::password::{hash_password, verify_password};
use crate::traits::AuthProvider;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

/// How long a session issued by the local provider stays valid.
const SESSION_TTL_HOURS: i64 = 24;

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredUser {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// Persisted provider state: registered users plus the current session.
///
/// Keeping the session in the state file mirrors a managed provider keeping
/// its session in browser storage; a new process resumes where the last one
/// signed in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuthState {
    users: HashMap<String, StoredUser>,
    session: Option<Session>,
}

/// File-backed authentication provider
///
/// Users are stored with Argon2id password hashes in a single JSON state
/// file. Every session transition emits an `AuthEvent` to subscribers.
pub struct LocalAuthProvider {
    state_path: PathBuf,
    state: Mutex<AuthState>,
    events: broadcast::Sender<AuthEvent>,
}

impl LocalAuthProvider {
    /// Load provider state from `state_path`, starting empty when the file
    /// is missing. An unparsable file is treated as empty state and logged,
    /// not surfaced: local state corruption must never lock the user out of
    /// the credential surface.
    pub async fn load(state_path: impl Into<PathBuf>) -> AuthResult<Self> {
        let state_path = state_path.into();

        let state = match fs::read(&state_path).await {
            Ok(bytes) => match serde_json::from_slice::<AuthState>(&bytes) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(
                        path = %state_path.display(),
                        error = %e,
                        "Auth state file unparsable, starting with empty state"
                    );
                    AuthState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AuthState::default(),
            Err(e) => return Err(AuthError::Io(e)),
        };

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(LocalAuthProvider {
            state_path,
            state: Mutex::new(state),
            events,
        })
    }

    async fn persist(&self, state: &AuthState) -> AuthResult<()> {
        if let Some(parent) = self.state_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.state_path, json).await?;
        Ok(())
    }

    fn new_session(user: User) -> Session {
        Session {
            user,
            access_token: Uuid::new_v4().to_string(),
            expires_at: Some(Utc::now() + Duration::hours(SESSION_TTL_HOURS)),
        }
    }

    fn emit(&self, event: AuthEvent) {
        // Nobody listening is fine; the UI may not have subscribed yet.
        let _ = self.events.send(event);
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn get_session(&self) -> AuthResult<Option<Session>> {
        let mut state = self.state.lock().await;

        if let Some(session) = state.session.clone() {
            if session.is_expired(Utc::now()) {
                state.session = None;
                self.persist(&state).await?;
                tracing::info!(email = %session.user.email, "Stored session expired");
                return Ok(None);
            }
            return Ok(Some(session));
        }

        Ok(None)
    }

    async fn sign_in_with_password(&self, credentials: Credentials) -> AuthResult<Session> {
        credentials.validate()?;
        let email = Self::normalize_email(&credentials.email);

        let mut state = self.state.lock().await;

        let user = state
            .users
            .get(&email)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Self::new_session(User {
            id: user.id,
            email: user.email,
        });
        state.session = Some(session.clone());
        self.persist(&state).await?;
        drop(state);

        tracing::info!(email = %session.user.email, "User signed in");
        self.emit(AuthEvent::SignedIn(session.clone()));

        Ok(session)
    }

    async fn sign_up(&self, credentials: Credentials) -> AuthResult<SignUpOutcome> {
        credentials.validate()?;
        let email = Self::normalize_email(&credentials.email);

        let mut state = self.state.lock().await;

        if state.users.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&credentials.password)?;
        let user = StoredUser {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(email, user.clone());

        // No out-of-band confirmation locally; the new account signs in
        // immediately.
        let session = Self::new_session(User {
            id: user.id,
            email: user.email,
        });
        state.session = Some(session.clone());
        self.persist(&state).await?;
        drop(state);

        tracing::info!(email = %session.user.email, "User registered");
        self.emit(AuthEvent::SignedIn(session.clone()));

        Ok(SignUpOutcome::SignedIn(session))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        let had_session = state.session.take();
        self.persist(&state).await?;
        drop(state);

        if let Some(session) = had_session {
            tracing::info!(email = %session.user.email, "User signed out");
        }
        self.emit(AuthEvent::SignedOut);

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn provider_in(dir: &tempfile::TempDir) -> LocalAuthProvider {
        LocalAuthProvider::load(dir.path().join("auth.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_up_signs_in_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_in(&dir).await;

        let outcome = provider
            .sign_up(Credentials::new("User@Example.com", "secret1"))
            .await
            .unwrap();

        let SignUpOutcome::SignedIn(session) = outcome else {
            panic!("local sign-up should sign in immediately");
        };
        assert_eq!(session.user.email, "user@example.com");
        assert_eq!(
            provider.get_session().await.unwrap().unwrap().user.email,
            "user@example.com"
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_in(&dir).await;

        provider
            .sign_up(Credentials::new("a@b.c", "secret1"))
            .await
            .unwrap();
        let err = provider
            .sign_up(Credentials::new("A@B.C", "other-secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_sign_in_with_wrong_password_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_in(&dir).await;

        provider
            .sign_up(Credentials::new("a@b.c", "secret1"))
            .await
            .unwrap();
        provider.sign_out().await.unwrap();

        let err = provider
            .sign_in_with_password(Credentials::new("a@b.c", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        // Unknown emails fail the same way; nothing leaks.
        let err = provider
            .sign_in_with_password(Credentials::new("ghost@b.c", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_session_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let provider = provider_in(&dir).await;
            provider
                .sign_up(Credentials::new("a@b.c", "secret1"))
                .await
                .unwrap();
        }

        let resumed = provider_in(&dir).await;
        let session = resumed.get_session().await.unwrap();
        assert_eq!(session.unwrap().user.email, "a@b.c");
    }

    #[tokio::test]
    async fn test_sign_out_clears_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        {
            let provider = provider_in(&dir).await;
            provider
                .sign_up(Credentials::new("a@b.c", "secret1"))
                .await
                .unwrap();
            provider.sign_out().await.unwrap();
        }

        let resumed = provider_in(&dir).await;
        assert!(resumed.get_session().await.unwrap().is_none());

        // The account itself survives sign-out.
        resumed
            .sign_in_with_password(Credentials::new("a@b.c", "secret1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_state_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, "{not json").unwrap();

        let provider = LocalAuthProvider::load(&path).await.unwrap();
        assert!(provider.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transitions_emit_events() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_in(&dir).await;
        let mut events = provider.subscribe();

        provider
            .sign_up(Credentials::new("a@b.c", "secret1"))
            .await
            .unwrap();
        provider.sign_out().await.unwrap();

        assert!(matches!(events.recv().await, Ok(AuthEvent::SignedIn(_))));
        assert!(matches!(events.recv().await, Ok(AuthEvent::SignedOut)));
    }
}
