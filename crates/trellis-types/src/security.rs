use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trellis_constants::EXECUTE_RECIPES_PERMISSION;

/// A named capability checked by the authorization service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
    pub description: String,
}

impl Permission {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Permission guarding the recipe admin screens
    pub fn execute_recipes() -> Self {
        Self::new(EXECUTE_RECIPES_PERMISSION, "Execute recipes")
    }
}

/// The caller of a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Authenticated name, `None` for anonymous callers
    pub name: Option<String>,
    /// Names of the permissions granted to this user
    pub permissions: BTreeSet<String>,
}

impl User {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_permission(mut self, permission: &Permission) -> Self {
        self.permissions.insert(permission.name.clone());
        self
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(&permission.name)
    }
}
