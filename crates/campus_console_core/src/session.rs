//! crates/campus_console_core/src/session.rs
//!
//! Process-wide authentication state. One `SessionStore` is constructed per
//! application instance and injected into everything that needs it; there is
//! no implicit module-level global, so tests get a fresh store each time.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::domain::{Credentials, User};
use crate::ports::{ApiError, ApiResult, IdentityService};

/// Where the session currently stands. A failed login is not a state of its
/// own: the store stays `Anonymous` and carries the failure message until the
/// caller clears it.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// The startup probe has not resolved yet.
    Bootstrapping,
    Anonymous { error: Option<String> },
    Authenticated(User),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Bootstrapping | SessionState::Anonymous { .. } => None,
        }
    }
}

/// Holds the current identity for the whole console. All transitions go
/// through one mutex, so every observer sees the same value after each one.
pub struct SessionStore {
    identity: Arc<dyn IdentityService>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self {
            identity,
            state: Mutex::new(SessionState::Bootstrapping),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().expect("session state poisoned").clone()
    }

    /// The startup probe. Runs once at application start; screens stay blocked
    /// behind `RouteGate` until this resolves.
    ///
    /// Any failure, a 401 included, simply means "no active session" and lands
    /// in plain `Anonymous` with no error recorded.
    pub async fn bootstrap(&self) {
        let next = match self.identity.current_identity().await {
            Ok(user) => SessionState::Authenticated(user),
            Err(_) => SessionState::Anonymous { error: None },
        };
        *self.state.lock().expect("session state poisoned") = next;
    }

    /// Attempts a login. On success the store adopts the identity payload the
    /// server returned, never a locally assembled copy. On failure the store
    /// stays `Anonymous`, records a message for the login form, and re-throws
    /// so the caller can keep the form populated.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        match self.identity.login(credentials).await {
            Ok(user) => {
                *self.state.lock().expect("session state poisoned") =
                    SessionState::Authenticated(user.clone());
                Ok(user)
            }
            Err(error) => {
                let message = match &error {
                    ApiError::Validation(message) => message.clone(),
                    ApiError::Unauthorized => "Invalid email or password.".to_string(),
                    ApiError::Transport(_) => "Sign-in failed. Please try again.".to_string(),
                };
                *self.state.lock().expect("session state poisoned") = SessionState::Anonymous {
                    error: Some(message),
                };
                Err(error)
            }
        }
    }

    /// Ends the session locally no matter what the server says. The remote
    /// call failing only gets logged: the guarantee that matters is that no
    /// further access happens from this process.
    pub async fn logout(&self) {
        if let Err(error) = self.identity.logout().await {
            warn!(%error, "remote logout failed, clearing local session anyway");
        }
        *self.state.lock().expect("session state poisoned") =
            SessionState::Anonymous { error: None };
    }

    /// Clears a recorded login failure. Caller-driven, never timer-driven.
    pub fn clear_error(&self) {
        let mut state = self.state.lock().expect("session state poisoned");
        if let SessionState::Anonymous { error } = &mut *state {
            *error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::gate::{RouteDecision, RouteGate};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    fn staff_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Dana Admin".to_string(),
            email: "dana@campus.edu".to_string(),
            role: Role::Admin,
            major: None,
        }
    }

    #[derive(Default)]
    struct MockIdentity {
        probe_user: Option<User>,
        login_error: Option<ApiError>,
        fail_logout: AtomicBool,
    }

    #[async_trait]
    impl IdentityService for MockIdentity {
        async fn current_identity(&self) -> ApiResult<User> {
            self.probe_user.clone().ok_or(ApiError::Unauthorized)
        }

        async fn login(&self, _credentials: &Credentials) -> ApiResult<User> {
            match &self.login_error {
                Some(error) => Err(error.clone()),
                None => Ok(staff_user()),
            }
        }

        async fn logout(&self) -> ApiResult<()> {
            if self.fail_logout.load(Ordering::SeqCst) {
                return Err(ApiError::Transport("gateway timeout".into()));
            }
            Ok(())
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "dana@campus.edu".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn starts_bootstrapping() {
        let store = SessionStore::new(Arc::new(MockIdentity::default()));
        assert!(matches!(store.state(), SessionState::Bootstrapping));
    }

    #[tokio::test]
    async fn probe_success_authenticates() {
        let identity = MockIdentity {
            probe_user: Some(staff_user()),
            ..Default::default()
        };
        let store = SessionStore::new(Arc::new(identity));

        store.bootstrap().await;

        assert!(store.state().is_authenticated());
    }

    #[tokio::test]
    async fn probe_failure_is_silent_anonymous() {
        let store = SessionStore::new(Arc::new(MockIdentity::default()));

        store.bootstrap().await;

        match store.state() {
            SessionState::Anonymous { error } => assert!(error.is_none()),
            other => panic!("expected Anonymous, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_adopts_the_returned_identity() {
        let store = SessionStore::new(Arc::new(MockIdentity::default()));
        store.bootstrap().await;

        let user = store.login(&credentials()).await.unwrap();

        assert_eq!(store.state().user().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn failed_login_records_the_server_message_and_rethrows() {
        let identity = MockIdentity {
            login_error: Some(ApiError::Validation("account is suspended".into())),
            ..Default::default()
        };
        let store = SessionStore::new(Arc::new(identity));
        store.bootstrap().await;

        let outcome = store.login(&credentials()).await;

        assert!(matches!(outcome, Err(ApiError::Validation(_))));
        match store.state() {
            SessionState::Anonymous { error } => {
                assert_eq!(error.as_deref(), Some("account is suspended"));
            }
            other => panic!("expected Anonymous, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn clear_error_resets_a_failed_login() {
        let identity = MockIdentity {
            login_error: Some(ApiError::Unauthorized),
            ..Default::default()
        };
        let store = SessionStore::new(Arc::new(identity));
        store.bootstrap().await;
        let _ = store.login(&credentials()).await;

        store.clear_error();

        match store.state() {
            SessionState::Anonymous { error } => assert!(error.is_none()),
            other => panic!("expected Anonymous, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn logout_clears_the_session_even_when_the_remote_call_fails() {
        let identity = MockIdentity {
            probe_user: Some(staff_user()),
            ..Default::default()
        };
        identity.fail_logout.store(true, Ordering::SeqCst);
        let store = SessionStore::new(Arc::new(identity));
        store.bootstrap().await;
        assert!(store.state().is_authenticated());

        store.logout().await;

        assert!(!store.state().is_authenticated());

        // every role-protected screen now redirects to the login page
        let gate = RouteGate::new("/login", "/unauthorized");
        let decision = gate.decide(&store.state(), Some(&[Role::Admin]));
        assert_eq!(decision, RouteDecision::RedirectTo("/login".to_string()));
    }
}
