//! crates/campus_console_core/src/gate.rs
//!
//! Decides whether a requested screen may render for the current session.
//! The gate holds no session state of its own; callers re-evaluate it on
//! every navigation and after every `SessionStore` transition.

use crate::domain::Role;
use crate::session::SessionState;

/// The three ways a navigation can resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The startup probe is still running; render nothing yet.
    ShowLoading,
    RedirectTo(String),
    Render,
}

/// Pure decision function over the session state and a screen's role list.
pub struct RouteGate {
    login_path: String,
    unauthorized_path: String,
}

impl RouteGate {
    pub fn new(login_path: impl Into<String>, unauthorized_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            unauthorized_path: unauthorized_path.into(),
        }
    }

    /// `allowed_roles: None` means any authenticated user may enter.
    pub fn decide(
        &self,
        session: &SessionState,
        allowed_roles: Option<&[Role]>,
    ) -> RouteDecision {
        match session {
            SessionState::Bootstrapping => RouteDecision::ShowLoading,
            // A recorded login failure changes nothing here: still anonymous.
            SessionState::Anonymous { .. } => {
                RouteDecision::RedirectTo(self.login_path.clone())
            }
            SessionState::Authenticated(user) => match allowed_roles {
                Some(roles) if !roles.contains(&user.role) => {
                    RouteDecision::RedirectTo(self.unauthorized_path.clone())
                }
                _ => RouteDecision::Render,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use uuid::Uuid;

    fn gate() -> RouteGate {
        RouteGate::new("/login", "/unauthorized")
    }

    fn user_with_role(role: Role) -> SessionState {
        SessionState::Authenticated(User {
            id: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@campus.edu".to_string(),
            role,
            major: None,
        })
    }

    #[test]
    fn bootstrapping_shows_loading() {
        assert_eq!(
            gate().decide(&SessionState::Bootstrapping, Some(&[Role::Admin])),
            RouteDecision::ShowLoading
        );
    }

    #[test]
    fn anonymous_redirects_to_login_with_or_without_error() {
        let gate = gate();
        for error in [None, Some("bad password".to_string())] {
            assert_eq!(
                gate.decide(&SessionState::Anonymous { error }, None),
                RouteDecision::RedirectTo("/login".to_string())
            );
        }
    }

    #[test]
    fn wrong_role_redirects_to_unauthorized() {
        assert_eq!(
            gate().decide(&user_with_role(Role::Student), Some(&[Role::Admin, Role::Teacher])),
            RouteDecision::RedirectTo("/unauthorized".to_string())
        );
    }

    #[test]
    fn matching_role_renders() {
        assert_eq!(
            gate().decide(&user_with_role(Role::Teacher), Some(&[Role::Admin, Role::Teacher])),
            RouteDecision::Render
        );
    }

    #[test]
    fn unrestricted_screens_render_for_every_role() {
        let gate = gate();
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            assert_eq!(gate.decide(&user_with_role(role), None), RouteDecision::Render);
        }
    }
}
