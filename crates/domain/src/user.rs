//! The authenticated principal and its module permissions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated principal's profile.
///
/// Owned exclusively by the auth state machine; replaced wholesale on
/// sign-in, refresh, or update, never partially mutated by UI code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Sign-in email address.
    pub email: String,
    /// Role name, e.g. "admin".
    pub role: String,
    /// Account status, e.g. "active".
    pub status: String,
    /// Per-module capability grants, ordered as the backend returns them.
    #[serde(default)]
    pub permissions: Vec<ModulePermission>,
}

impl User {
    /// Returns true if the user holds the given capability on a module.
    ///
    /// Modules are looked up by code; an unknown module grants nothing.
    #[must_use]
    pub fn can(&self, module_code: &str, capability: Capability) -> bool {
        self.permissions
            .iter()
            .filter(|m| m.module_code == module_code)
            .flat_map(|m| &m.permissions)
            .any(|p| p.allows(capability))
    }
}

/// Capability grants scoped to one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermission {
    /// Module identifier.
    pub module_id: Uuid,
    /// Human-readable module name.
    pub module_name: String,
    /// Stable module code used for lookups.
    pub module_code: String,
    /// Capability flag sets for this module.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// A set of boolean capability flags scoped to one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Permission {
    /// May create records.
    pub can_create: bool,
    /// May view records.
    pub can_view: bool,
    /// May update records.
    pub can_update: bool,
    /// May delete records.
    pub can_delete: bool,
    /// May export records.
    pub can_export: bool,
    /// May approve records.
    pub can_approve: bool,
}

impl Permission {
    /// A permission set granting nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            can_create: false,
            can_view: false,
            can_update: false,
            can_delete: false,
            can_export: false,
            can_approve: false,
        }
    }

    /// Returns true if this set grants the given capability.
    #[must_use]
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Create => self.can_create,
            Capability::View => self.can_view,
            Capability::Update => self.can_update,
            Capability::Delete => self.can_delete,
            Capability::Export => self.can_export,
            Capability::Approve => self.can_approve,
        }
    }
}

/// A single capability the admin screens gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create records.
    Create,
    /// View records.
    View,
    /// Update records.
    Update,
    /// Delete records.
    Delete,
    /// Export records.
    Export,
    /// Approve records.
    Approve,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(module_code: &str, permission: Permission) -> User {
        User {
            id: Uuid::now_v7(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "admin".to_string(),
            status: "active".to_string(),
            permissions: vec![ModulePermission {
                module_id: Uuid::now_v7(),
                module_name: "Bookings".to_string(),
                module_code: module_code.to_string(),
                permissions: vec![permission],
            }],
        }
    }

    #[test]
    fn test_capability_lookup() {
        let user = user_with(
            "bookings",
            Permission {
                can_view: true,
                can_approve: true,
                ..Permission::none()
            },
        );

        assert!(user.can("bookings", Capability::View));
        assert!(user.can("bookings", Capability::Approve));
        assert!(!user.can("bookings", Capability::Delete));
    }

    #[test]
    fn test_unknown_module_grants_nothing() {
        let user = user_with(
            "bookings",
            Permission {
                can_view: true,
                ..Permission::none()
            },
        );
        assert!(!user.can("customers", Capability::View));
    }

    #[test]
    fn test_permission_none_grants_nothing() {
        let p = Permission::none();
        assert!(!p.allows(Capability::Create));
        assert!(!p.allows(Capability::Export));
    }

    #[test]
    fn test_user_deserializes_without_permissions() {
        let json = format!(
            r#"{{"id":"{}","name":"Ada","email":"a@b.c","role":"admin","status":"active"}}"#,
            Uuid::now_v7()
        );
        let user: User = serde_json::from_str(&json).unwrap();
        assert!(user.permissions.is_empty());
    }
}
