//! services/console/src/routes.rs
//!
//! The console's screen table: which screens exist and who may open them.
//! `RouteGate` is consulted with these entries on every navigation.

use campus_console_core::domain::Role;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// One navigable screen. `allowed_roles: None` means any authenticated user.
pub struct Screen {
    pub path: &'static str,
    pub title: &'static str,
    pub allowed_roles: Option<&'static [Role]>,
}

const STAFF_ONLY: &[Role] = &[Role::Admin];
const REQUEST_REVIEWERS: &[Role] = &[Role::Admin, Role::Teacher];

/// Management screens are admin territory; enrollment requests are also
/// reviewed by teachers; the dashboard is open to everyone signed in.
pub const ROUTE_TABLE: &[Screen] = &[
    Screen {
        path: "/dashboard",
        title: "Dashboard",
        allowed_roles: None,
    },
    Screen {
        path: "/students",
        title: "Students",
        allowed_roles: Some(STAFF_ONLY),
    },
    Screen {
        path: "/teachers",
        title: "Teachers",
        allowed_roles: Some(STAFF_ONLY),
    },
    Screen {
        path: "/subjects",
        title: "Subjects",
        allowed_roles: Some(STAFF_ONLY),
    },
    Screen {
        path: "/course-groups",
        title: "Course Groups",
        allowed_roles: Some(STAFF_ONLY),
    },
    Screen {
        path: "/enrollment-requests",
        title: "Enrollment Requests",
        allowed_roles: Some(REQUEST_REVIEWERS),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use campus_console_core::domain::User;
    use campus_console_core::gate::{RouteDecision, RouteGate};
    use campus_console_core::session::SessionState;
    use uuid::Uuid;

    fn session_for(role: Role) -> SessionState {
        SessionState::Authenticated(User {
            id: Uuid::new_v4(),
            name: "Pat".to_string(),
            email: "pat@campus.edu".to_string(),
            role,
            major: None,
        })
    }

    #[test]
    fn admins_can_open_every_screen() {
        let gate = RouteGate::new(LOGIN_PATH, UNAUTHORIZED_PATH);
        let session = session_for(Role::Admin);
        for screen in ROUTE_TABLE {
            assert_eq!(
                gate.decide(&session, screen.allowed_roles),
                RouteDecision::Render,
                "admin should render {}",
                screen.path
            );
        }
    }

    #[test]
    fn teachers_review_requests_but_cannot_manage_collections() {
        let gate = RouteGate::new(LOGIN_PATH, UNAUTHORIZED_PATH);
        let session = session_for(Role::Teacher);

        let decisions: Vec<_> = ROUTE_TABLE
            .iter()
            .map(|screen| (screen.path, gate.decide(&session, screen.allowed_roles)))
            .collect();

        for (path, decision) in decisions {
            let expected = match path {
                "/dashboard" | "/enrollment-requests" => RouteDecision::Render,
                _ => RouteDecision::RedirectTo(UNAUTHORIZED_PATH.to_string()),
            };
            assert_eq!(decision, expected, "unexpected decision for {path}");
        }
    }

    #[test]
    fn students_only_see_the_dashboard() {
        let gate = RouteGate::new(LOGIN_PATH, UNAUTHORIZED_PATH);
        let session = session_for(Role::Student);
        for screen in ROUTE_TABLE {
            let decision = gate.decide(&session, screen.allowed_roles);
            if screen.path == "/dashboard" {
                assert_eq!(decision, RouteDecision::Render);
            } else {
                assert_eq!(
                    decision,
                    RouteDecision::RedirectTo(UNAUTHORIZED_PATH.to_string())
                );
            }
        }
    }
}
