/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The target may be shown.
    Proceed,
    /// Not authenticated; go to the login screen and remember where the
    /// user was headed so login can send them back there.
    RedirectToLogin { next: String },
    /// Already authenticated; the login screen is pointless, go home.
    RedirectHome,
}

/// Pure navigation decision. Screens that require authentication bounce
/// anonymous users to login with the original destination preserved;
/// authenticated users asking for the login screen get sent home instead.
pub fn resolve_navigation(authenticated: bool, requires_auth: bool, target: &str) -> Navigation {
    if requires_auth && !authenticated {
        return Navigation::RedirectToLogin {
            next: target.to_string(),
        };
    }
    if authenticated && target == "/login" {
        return Navigation::RedirectHome;
    }
    Navigation::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_user_is_sent_to_login_with_destination() {
        assert_eq!(
            resolve_navigation(false, true, "/students"),
            Navigation::RedirectToLogin {
                next: "/students".to_string()
            }
        );
    }

    #[test]
    fn anonymous_user_may_visit_public_screens() {
        assert_eq!(resolve_navigation(false, false, "/login"), Navigation::Proceed);
    }

    #[test]
    fn authenticated_user_proceeds_to_protected_screens() {
        assert_eq!(resolve_navigation(true, true, "/courses"), Navigation::Proceed);
    }

    #[test]
    fn authenticated_user_is_bounced_off_the_login_screen() {
        assert_eq!(resolve_navigation(true, false, "/login"), Navigation::RedirectHome);
    }
}
