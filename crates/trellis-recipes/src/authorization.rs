//! Permission checks for named users

use crate::services::AuthorizationService;
use std::collections::{BTreeSet, HashMap};
use trellis_types::{Permission, User};

/// Grants permissions to users by name, on top of those a user already
/// carries. Anonymous callers are never authorized.
#[derive(Debug, Clone, Default)]
pub struct PermissionAuthorizer {
    grants: HashMap<String, BTreeSet<String>>,
}

impl PermissionAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `permission` to the user called `user_name`
    pub fn grant(mut self, user_name: impl Into<String>, permission: &Permission) -> Self {
        self.grants
            .entry(user_name.into())
            .or_default()
            .insert(permission.name.clone());
        self
    }

    fn is_granted(&self, user: &User, permission: &Permission) -> bool {
        let Some(name) = user.name.as_deref() else {
            return false;
        };

        user.has_permission(permission)
            || self
                .grants
                .get(name)
                .is_some_and(|granted| granted.contains(&permission.name))
    }
}

#[async_trait::async_trait]
impl AuthorizationService for PermissionAuthorizer {
    async fn authorize(&self, user: &User, permission: &Permission) -> bool {
        self.is_granted(user, permission)
    }
}
