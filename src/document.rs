//! Documents as seen by the security subscriber.
//!
//! A document opts into permission handling by exposing the
//! [`SecurityBehavior`] capability; documents without it pass through the
//! subscriber untouched.

use serde::{Deserialize, Serialize};
use strata_core::{RoleId, RolePermissions};
use uuid::Uuid;

/// Capability of documents that carry a role permission map.
pub trait SecurityBehavior {
    fn permissions(&self) -> &RolePermissions;

    fn set_permissions(&mut self, permissions: RolePermissions);
}

pub trait Document {
    /// Repository path of the document, once it has one.
    fn path(&self) -> Option<&str> {
        None
    }

    fn security(&self) -> Option<&dyn SecurityBehavior> {
        None
    }

    fn security_mut(&mut self) -> Option<&mut dyn SecurityBehavior> {
        None
    }
}

/// A page or snippet with security settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub uuid: Uuid,
    pub title: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub permissions: RolePermissions,
}

impl ContentDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            path: None,
            permissions: RolePermissions::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_permissions(mut self, permissions: RolePermissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Sets `permission` to granted for `role`, creating the role entry if
    /// needed.
    pub fn grant(&mut self, role: RoleId, permission: &str) {
        self.permissions
            .entry(role)
            .or_default()
            .insert(permission.to_string(), true);
    }

    /// Sets `permission` to denied for `role`, keeping the role entry.
    pub fn deny(&mut self, role: RoleId, permission: &str) {
        self.permissions
            .entry(role)
            .or_default()
            .insert(permission.to_string(), false);
    }

    /// Drops every permission setting of `role`.
    pub fn revoke_role(&mut self, role: RoleId) {
        self.permissions.remove(&role);
    }
}

impl SecurityBehavior for ContentDocument {
    fn permissions(&self) -> &RolePermissions {
        &self.permissions
    }

    fn set_permissions(&mut self, permissions: RolePermissions) {
        self.permissions = permissions;
    }
}

impl Document for ContentDocument {
    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn security(&self) -> Option<&dyn SecurityBehavior> {
        Some(self)
    }

    fn security_mut(&mut self) -> Option<&mut dyn SecurityBehavior> {
        Some(self)
    }
}

/// A document without security settings, such as a route or a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsecuredDocument {
    #[serde(default)]
    pub path: Option<String>,
}

impl Document for UnsecuredDocument {
    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
