//! Named permission rules: menu/route key to allow-set.
//!
//! The rule table is loaded at startup and never mutated afterwards. It
//! ships with a compiled default for the console and can be replaced from a
//! JSON document so new menu keys need no recompilation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::check::has_access;
use crate::role::{Role, RoleSet};

/// Map from menu/route key to the set of roles allowed to exercise it.
///
/// A key absent from the table behaves as an empty allow-set: every check
/// against it denies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionRules {
    rules: BTreeMap<String, RoleSet>,
}

impl PermissionRules {
    /// Creates an empty rule table (denies every key).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The compiled default rule table for the Learnly console.
    ///
    /// `dashboard` and `profile` are open to every role so redirect targets
    /// never form a denial loop.
    #[must_use]
    pub fn console_defaults() -> Self {
        let mut rules = Self::empty();
        rules.insert("dashboard", RoleSet::all());
        rules.insert("profile", RoleSet::all());
        rules.insert("notifications", RoleSet::all());
        rules.insert("staff", RoleSet::of(&[Role::SuperAdmin, Role::Admin]));
        rules.insert(
            "courses",
            RoleSet::of(&[Role::SuperAdmin, Role::Admin, Role::CourseController]),
        );
        rules.insert(
            "exams",
            RoleSet::of(&[
                Role::SuperAdmin,
                Role::Admin,
                Role::CourseController,
                Role::DataMaintenance,
            ]),
        );
        rules.insert(
            "complaints",
            RoleSet::of(&[Role::SuperAdmin, Role::Admin, Role::BosController]),
        );
        rules.insert(
            "meetings",
            RoleSet::of(&[
                Role::SuperAdmin,
                Role::Admin,
                Role::BosController,
                Role::BosMembers,
            ]),
        );
        rules.insert(
            "voting",
            RoleSet::of(&[
                Role::SuperAdmin,
                Role::Admin,
                Role::BosController,
                Role::BosMembers,
            ]),
        );
        rules.insert(
            "certificates",
            RoleSet::of(&[Role::SuperAdmin, Role::Admin, Role::DataMaintenance]),
        );
        rules.insert(
            "marketing",
            RoleSet::of(&[Role::SuperAdmin, Role::Admin, Role::MarketingController]),
        );
        rules
    }

    /// Loads a rule table from a JSON document of the form
    /// `{"staff": ["superadmin", "admin"], ...}`.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the document is not valid JSON or
    /// names an unrecognized role tag.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds or replaces the allow-set for a key.
    pub fn insert(&mut self, key: impl Into<String>, allowed: RoleSet) {
        self.rules.insert(key.into(), allowed);
    }

    /// Returns the allow-set for a key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RoleSet> {
        self.rules.get(key)
    }

    /// Returns true iff the role tag may exercise the named capability.
    ///
    /// An absent key degrades to the empty allow-set, so the call always
    /// denies; otherwise delegates to [`has_access`].
    #[must_use]
    pub fn allows(&self, role_tag: &str, key: &str) -> bool {
        match self.rules.get(key) {
            Some(allowed) => has_access(role_tag, allowed),
            None => false,
        }
    }

    /// Returns the sorted list of menu keys the role may see.
    #[must_use]
    pub fn menu_for(&self, role_tag: &str) -> Vec<&str> {
        // BTreeMap iteration is already key-sorted.
        self.rules
            .iter()
            .filter(|(_, allowed)| has_access(role_tag, allowed))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

impl Default for PermissionRules {
    fn default() -> Self {
        Self::console_defaults()
    }
}
