//! Fail-closed access decision functions.
//!
//! Both checks are total: every input, including empty strings and
//! unrecognized tags, yields a definite boolean and never an error.

use crate::role::{Role, RoleSet};

/// Returns true iff `role_tag` names a known role that is a member of
/// `allowed`.
///
/// An empty or unrecognized tag denies, and an empty allow-set denies.
/// Unknown tags are not an error; they simply fail every check they are not
/// explicitly listed for (and they can never be listed, since the set holds
/// only known roles).
#[must_use]
pub fn has_access(role_tag: &str, allowed: &RoleSet) -> bool {
    if allowed.is_empty() {
        return false;
    }
    match role_tag.parse::<Role>() {
        Ok(role) => allowed.contains(role),
        Err(_) => false,
    }
}

/// Returns the privilege level for a role tag, with level 0 for any tag
/// absent from the hierarchy table (including the empty string).
#[must_use]
pub fn level_for_tag(tag: &str) -> u8 {
    tag.parse::<Role>().map_or(0, |role| role.level())
}

/// Returns true iff `role_tag` is at least as privileged as `minimum_tag`.
///
/// Unknown tags map to level 0, so an unknown role is the least privileged
/// by construction. Two unknown tags are mutually sufficient (0 >= 0);
/// callers that need to reject unrecognized roles must use [`has_access`]
/// with an explicit allow-set instead.
#[must_use]
pub fn has_minimum_role(role_tag: &str, minimum_tag: &str) -> bool {
    level_for_tag(role_tag) >= level_for_tag(minimum_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admins() -> RoleSet {
        RoleSet::of(&[Role::Admin, Role::SuperAdmin])
    }

    #[test]
    fn member_role_is_allowed() {
        assert!(has_access("superadmin", &admins()));
        assert!(has_access("admin", &admins()));
    }

    #[test]
    fn non_member_role_is_denied() {
        assert!(!has_access("coursecontroller", &admins()));
        assert!(!has_access("markettingcontroller", &admins()));
    }

    #[test]
    fn empty_role_is_denied() {
        assert!(!has_access("", &admins()));
    }

    #[test]
    fn unknown_role_is_denied() {
        assert!(!has_access("janitor", &admins()));
    }

    #[test]
    fn empty_allow_set_denies_everyone() {
        let empty = RoleSet::none();
        for role in Role::ALL {
            assert!(!has_access(role.tag(), &empty));
        }
        assert!(!has_access("", &empty));
        assert!(!has_access("janitor", &empty));
    }

    #[test]
    fn level_for_known_tags() {
        assert_eq!(level_for_tag("superadmin"), 7);
        assert_eq!(level_for_tag("coursecontroller"), 3);
    }

    #[test]
    fn level_for_unknown_tags_is_zero() {
        assert_eq!(level_for_tag(""), 0);
        assert_eq!(level_for_tag("janitor"), 0);
    }

    #[test]
    fn hierarchy_is_monotonic() {
        for higher in Role::ALL {
            for lower in Role::ALL {
                let expected = higher.level() >= lower.level();
                assert_eq!(
                    has_minimum_role(higher.tag(), lower.tag()),
                    expected,
                    "{} vs {}",
                    higher.tag(),
                    lower.tag()
                );
            }
        }
    }

    #[test]
    fn course_controller_is_below_admin() {
        assert!(!has_minimum_role("coursecontroller", "admin"));
        assert!(has_minimum_role("admin", "coursecontroller"));
    }

    #[test]
    fn equal_levels_are_sufficient() {
        for role in Role::ALL {
            assert!(has_minimum_role(role.tag(), role.tag()));
        }
    }

    #[test]
    fn unknown_roles_are_mutually_sufficient() {
        // 0 >= 0; callers must not rely on has_minimum_role to reject
        // unrecognized roles.
        assert!(has_minimum_role("", ""));
        assert!(has_minimum_role("janitor", "gardener"));
        assert!(!has_minimum_role("janitor", "markettingcontroller"));
        assert!(has_minimum_role("markettingcontroller", "janitor"));
    }
}
