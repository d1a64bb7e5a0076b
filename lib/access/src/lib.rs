//! Role-based access control for the Learnly administration console.
//!
//! This crate is the pure decision component of the console: given a role
//! tag and an allow-set (or a named permission key), it answers "may this
//! role do this thing" with no side effects and no I/O. It also defines the
//! role hierarchy for "at least as privileged as" checks and a guard
//! wrapper that short-circuits access to protected values.
//!
//! All checks fail closed: a missing, empty, or unrecognized role denies,
//! and an empty or unknown allow-set denies. A misconfigured or
//! not-yet-loaded role can therefore never silently grant access.
//!
//! # Example
//!
//! ```
//! use learnly_access::{Role, RoleSet, has_access, has_minimum_role};
//!
//! let staff_admins = RoleSet::of(&[Role::SuperAdmin, Role::Admin]);
//! assert!(has_access("superadmin", &staff_admins));
//! assert!(!has_access("coursecontroller", &staff_admins));
//! assert!(!has_access("", &staff_admins));
//!
//! assert!(has_minimum_role("admin", "coursecontroller"));
//! assert!(!has_minimum_role("coursecontroller", "admin"));
//! ```

pub mod check;
pub mod guard;
pub mod navigate;
pub mod role;
pub mod rules;

pub use check::{has_access, has_minimum_role, level_for_tag};
pub use guard::{Access, DeniedAccess, Guarded, RoleSource};
pub use navigate::{Navigation, navigate};
pub use role::{ParseRoleError, Role, RoleSet, display_name_for_tag};
pub use rules::PermissionRules;
