//! Role-gated routing and navigation.
//!
//! Every route declares an [`Access`] level. On each navigation the router
//! asks [`Gate::decide`] what to do with the current session, and the
//! navigation frame shows only the entries [`nav_items_for`] returns.

use api::SessionSnapshot;

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only visitors without a session (login, registration).
    PublicOnly,
    /// Any signed-in user.
    Protected,
    /// Signed-in principals only.
    PrincipalOnly,
}

/// Where a redirect sends the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    Landing,
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Landing => "/",
        }
    }
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Session still initializing; show a spinner and mount nothing.
    Loading,
    Redirect(Destination),
    Render,
}

impl Gate {
    pub fn decide(session: &SessionSnapshot, access: Access) -> Self {
        if session.loading {
            return Self::Loading;
        }
        match access {
            Access::PublicOnly if session.is_authenticated() => {
                Self::Redirect(Destination::Landing)
            }
            Access::PublicOnly => Self::Render,
            Access::Protected | Access::PrincipalOnly if !session.is_authenticated() => {
                Self::Redirect(Destination::Login)
            }
            Access::PrincipalOnly if !session.is_principal() => {
                Self::Redirect(Destination::Landing)
            }
            Access::Protected | Access::PrincipalOnly => Self::Render,
        }
    }
}

/// One entry of the navigation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub access: Access,
}

impl NavItem {
    /// Whether `current` is this entry or one of its sub-pages.
    pub fn is_active(&self, current: &str) -> bool {
        current == self.path || (self.path != "/" && current.starts_with(self.path))
    }
}

pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem { label: "Dashboard", path: "/", access: Access::Protected },
    NavItem { label: "Students", path: "/students", access: Access::PrincipalOnly },
    NavItem { label: "Admission", path: "/students/new", access: Access::PrincipalOnly },
    NavItem { label: "Teachers", path: "/teachers", access: Access::PrincipalOnly },
    NavItem { label: "Fee Management", path: "/fees", access: Access::PrincipalOnly },
    NavItem { label: "Attendance", path: "/attendance", access: Access::Protected },
    NavItem { label: "Notifications", path: "/notifications", access: Access::PrincipalOnly },
];

/// Navigation entries the session may open.
pub fn nav_items_for(session: &SessionSnapshot) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .copied()
        .filter(|item| Gate::decide(session, item.access) == Gate::Render)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::AuthResponse;

    fn session(role: Option<&str>) -> SessionSnapshot {
        let Some(role) = role else {
            return SessionSnapshot::default();
        };
        let payload: AuthResponse =
            serde_json::from_value(api::testing::auth_json(role, "tok")).unwrap();
        SessionSnapshot {
            user: Some(payload.user),
            school: Some(payload.school),
            token: Some(payload.access_token),
            loading: false,
        }
    }

    #[test]
    fn test_loading_blocks_every_route() {
        let loading = SessionSnapshot {
            loading: true,
            ..session(Some("principal"))
        };
        for access in [Access::PublicOnly, Access::Protected, Access::PrincipalOnly] {
            assert_eq!(Gate::decide(&loading, access), Gate::Loading);
        }
    }

    #[test]
    fn test_anonymous_visitor() {
        let anon = session(None);
        assert_eq!(Gate::decide(&anon, Access::PublicOnly), Gate::Render);
        assert_eq!(
            Gate::decide(&anon, Access::Protected),
            Gate::Redirect(Destination::Login)
        );
        assert_eq!(
            Gate::decide(&anon, Access::PrincipalOnly),
            Gate::Redirect(Destination::Login)
        );
    }

    #[test]
    fn test_teacher_is_bounced_from_principal_routes() {
        let teacher = session(Some("teacher"));
        assert_eq!(Gate::decide(&teacher, Access::Protected), Gate::Render);
        assert_eq!(
            Gate::decide(&teacher, Access::PrincipalOnly),
            Gate::Redirect(Destination::Landing)
        );
        assert_eq!(
            Gate::decide(&teacher, Access::PublicOnly),
            Gate::Redirect(Destination::Landing)
        );
    }

    #[test]
    fn test_principal_opens_everything_but_login() {
        let principal = session(Some("principal"));
        assert_eq!(Gate::decide(&principal, Access::PrincipalOnly), Gate::Render);
        assert_eq!(Gate::decide(&principal, Access::Protected), Gate::Render);
        assert_eq!(
            Gate::decide(&principal, Access::PublicOnly),
            Gate::Redirect(Destination::Landing)
        );
    }

    #[test]
    fn test_unknown_role_is_not_principal() {
        let other = session(Some("accountant"));
        assert!(other.is_authenticated());
        assert_eq!(
            Gate::decide(&other, Access::PrincipalOnly),
            Gate::Redirect(Destination::Landing)
        );
    }

    #[test]
    fn test_nav_items_follow_role() {
        let labels = |s: &SessionSnapshot| {
            nav_items_for(s)
                .into_iter()
                .map(|i| i.label)
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&session(Some("teacher"))), vec!["Dashboard", "Attendance"]);
        assert_eq!(labels(&session(Some("principal"))).len(), NAV_ITEMS.len());
        assert!(labels(&session(None)).is_empty());
    }

    #[test]
    fn test_active_nav_item() {
        let students = NAV_ITEMS[1];
        assert!(students.is_active("/students"));
        assert!(students.is_active("/students/abc"));
        assert!(!NAV_ITEMS[0].is_active("/students"));
        assert!(NAV_ITEMS[0].is_active("/"));
    }
}
