//! Role tags and the privilege hierarchy of the Learnly console.
//!
//! The console recognizes a closed set of seven roles. Each role carries a
//! fixed privilege level (7 = highest, 1 = lowest) used for "at least as
//! privileged as" comparisons; exact capability checks go through allow-sets
//! instead of levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actor role in the Learnly console.
///
/// The wire and storage representation is the lowercase tag used by the
/// remote API. `markettingcontroller` keeps the upstream API spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full platform control.
    SuperAdmin,
    /// Administrative oversight of staff and content.
    Admin,
    /// Controls board-of-studies records and complaints.
    BosController,
    /// Board-of-studies member: meetings and voting.
    BosMembers,
    /// Manages courses and exam records.
    CourseController,
    /// Maintains reference data and certificates.
    DataMaintenance,
    /// Marketing campaigns and outreach.
    #[serde(rename = "markettingcontroller")]
    MarketingController,
}

impl Role {
    /// All roles, ordered from most to least privileged.
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::BosController,
        Role::BosMembers,
        Role::CourseController,
        Role::DataMaintenance,
        Role::MarketingController,
    ];

    /// Returns the wire/storage tag for this role.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "superadmin",
            Self::Admin => "admin",
            Self::BosController => "boscontroller",
            Self::BosMembers => "bosmembers",
            Self::CourseController => "coursecontroller",
            Self::DataMaintenance => "datamaintenance",
            Self::MarketingController => "markettingcontroller",
        }
    }

    /// Returns the human-readable label used in denial messages and
    /// profile headers. Presentation only, never security-relevant.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Administrator",
            Self::Admin => "Administrator",
            Self::BosController => "BoS Controller",
            Self::BosMembers => "BoS Member",
            Self::CourseController => "Course Controller",
            Self::DataMaintenance => "Data Maintenance",
            Self::MarketingController => "Marketing Controller",
        }
    }

    /// Returns the privilege level of this role (7 = highest, 1 = lowest).
    #[must_use]
    pub fn level(&self) -> u8 {
        match self {
            Self::SuperAdmin => 7,
            Self::Admin => 6,
            Self::BosController => 5,
            Self::BosMembers => 4,
            Self::CourseController => 3,
            Self::DataMaintenance => 2,
            Self::MarketingController => 1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Error returned when parsing a role tag from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The tag that failed to parse.
    pub tag: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized role tag: {:?}", self.tag)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.tag() == s)
            .ok_or_else(|| ParseRoleError { tag: s.to_string() })
    }
}

/// Returns the display name for a role tag, or `None` for unrecognized tags.
#[must_use]
pub fn display_name_for_tag(tag: &str) -> Option<&'static str> {
    tag.parse::<Role>().ok().map(|role| role.display_name())
}

/// Set of roles allowed to exercise a capability.
///
/// An empty set denies everyone; there is no wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet {
    roles: Vec<Role>,
}

impl RoleSet {
    /// Creates an empty role set (denies all).
    #[must_use]
    pub fn none() -> Self {
        Self { roles: Vec::new() }
    }

    /// Creates a role set from the given roles, deduplicated and sorted by
    /// descending privilege.
    #[must_use]
    pub fn of(roles: &[Role]) -> Self {
        let mut roles = roles.to_vec();
        roles.sort();
        roles.dedup();
        Self { roles }
    }

    /// Creates a role set containing every console role.
    #[must_use]
    pub fn all() -> Self {
        Self::of(&Role::ALL)
    }

    /// Returns true if the set contains no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns true if the set contains the given role.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns the roles as a slice.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Renders the display names of the member roles, comma-separated, for
    /// denial messages.
    #[must_use]
    pub fn display_list(&self) -> String {
        self.roles
            .iter()
            .map(|role| role.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::none()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let roles: Vec<Role> = iter.into_iter().collect();
        Self::of(&roles)
    }
}
