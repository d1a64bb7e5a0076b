//! Pure route-guard decision for navigation requests.

use crate::rules::PermissionRules;

/// Outcome of a navigation request to a protected destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The actor may render the requested destination.
    Proceed,
    /// No actor is signed in; go to the login entry point.
    RedirectToLogin,
    /// The actor's role is not allowed; go to the safe fallback
    /// destination. The fallback must itself be open to every
    /// authenticated role so no denial loop can form.
    RedirectToFallback,
}

/// Decides a navigation request.
///
/// `role` is `None` when no actor is signed in, which short-circuits to the
/// login redirect before any permission lookup. Callers must re-evaluate
/// this on every navigation event rather than caching the result, since the
/// identity can change between navigations.
#[must_use]
pub fn navigate(rules: &PermissionRules, destination_key: &str, role: Option<&str>) -> Navigation {
    let Some(role) = role else {
        return Navigation::RedirectToLogin;
    };
    if rules.allows(role, destination_key) {
        Navigation::Proceed
    } else {
        Navigation::RedirectToFallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn unauthenticated_redirects_to_login() {
        let rules = PermissionRules::console_defaults();
        assert_eq!(navigate(&rules, "staff", None), Navigation::RedirectToLogin);
        // Even for destinations open to everyone.
        assert_eq!(
            navigate(&rules, "dashboard", None),
            Navigation::RedirectToLogin
        );
    }

    #[test]
    fn allowed_role_proceeds() {
        let rules = PermissionRules::console_defaults();
        assert_eq!(
            navigate(&rules, "staff", Some("admin")),
            Navigation::Proceed
        );
    }

    #[test]
    fn denied_role_redirects_to_fallback() {
        let rules = PermissionRules::console_defaults();
        assert_eq!(
            navigate(&rules, "staff", Some("coursecontroller")),
            Navigation::RedirectToFallback
        );
        assert_eq!(
            navigate(&rules, "staff", Some("janitor")),
            Navigation::RedirectToFallback
        );
    }

    #[test]
    fn unknown_destination_redirects_to_fallback() {
        let rules = PermissionRules::console_defaults();
        assert_eq!(
            navigate(&rules, "nonexistent", Some("superadmin")),
            Navigation::RedirectToFallback
        );
    }

    #[test]
    fn fallback_destination_is_open_to_every_role() {
        // Guards redirect denied actors to the dashboard; every role must
        // be able to land there.
        let rules = PermissionRules::console_defaults();
        for role in Role::ALL {
            assert_eq!(
                navigate(&rules, "dashboard", Some(role.tag())),
                Navigation::Proceed
            );
        }
    }
}
