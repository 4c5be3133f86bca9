//! Session gate
//!
//! Observes authentication state and decides whether the file-management
//! surface is reachable at all. The state machine is
//! `Unknown -> Authenticated | Anonymous`; sign-out returns to `Anonymous`.

use crate::error::AuthResult;
use crate::models::{AuthEvent, Credentials, Session, SignUpOutcome, User};
use crate::traits::AuthProvider;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;

/// Where the UI currently stands with respect to authentication.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Session not yet resolved; show neither surface.
    #[default]
    Unknown,
    /// No session; only the credential-entry surface is reachable.
    Anonymous,
    /// Signed in; the file-management surface is reachable.
    Authenticated(User),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    fn from_session(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionState::Authenticated(session.user),
            None => SessionState::Anonymous,
        }
    }
}

/// Owns current identity and fans session state out to the presentation
/// layer through a watch channel.
pub struct SessionGate {
    provider: Arc<dyn AuthProvider>,
    state: watch::Sender<SessionState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionGate {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        SessionGate {
            provider,
            state,
            listener: Mutex::new(None),
        }
    }

    /// Resolve the initial session. A provider failure is treated exactly
    /// like no session; there is no automatic retry.
    pub async fn resolve(&self) -> SessionState {
        let next = match self.provider.get_session().await {
            Ok(session) => SessionState::from_session(session),
            Err(e) => {
                tracing::warn!(error = %e, "Session fetch failed, treating as anonymous");
                SessionState::Anonymous
            }
        };
        self.state.send_replace(next.clone());
        next
    }

    /// Start forwarding provider session-change events into the gate state.
    /// The previous listener, if any, is stopped; the task ends when the
    /// provider's event channel closes.
    pub async fn spawn_listener(&self) {
        let mut events = self.provider.subscribe();
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AuthEvent::SignedIn(session)) => {
                        state.send_replace(SessionState::Authenticated(session.user));
                    }
                    Ok(AuthEvent::SignedOut) => {
                        state.send_replace(SessionState::Anonymous);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Auth event stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        if let Some(previous) = self.listener.lock().await.replace(handle) {
            previous.abort();
        }
    }

    pub async fn sign_in(&self, credentials: Credentials) -> AuthResult<Session> {
        let session = self.provider.sign_in_with_password(credentials).await?;
        self.state
            .send_replace(SessionState::Authenticated(session.user.clone()));
        Ok(session)
    }

    pub async fn sign_up(&self, credentials: Credentials) -> AuthResult<SignUpOutcome> {
        let outcome = self.provider.sign_up(credentials).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.state
                .send_replace(SessionState::Authenticated(session.user.clone()));
        }
        Ok(outcome)
    }

    /// Sign out and return to `Anonymous`. Per-session derived state held by
    /// callers (listing snapshots and the like) should be dropped on this
    /// transition.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await?;
        self.state.send_replace(SessionState::Anonymous);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        // Outstanding provider calls may still settle, but nothing mutates
        // the torn-down gate.
        if let Some(handle) = self.listener.get_mut().take() {
            handle.abort();
        }
    }
}
