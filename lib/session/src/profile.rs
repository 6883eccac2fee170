//! The authenticated user's profile as returned by the backend.

use paydesk_core::{AccessList, EntityKey};
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user.
///
/// The `modules` and `menus` assignments are normalized when the profile is
/// deserialized, so they may arrive as arrays, JSON-encoded strings, or be
/// missing entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    id: Option<EntityKey>,
    #[serde(default, alias = "userName", alias = "login")]
    username: Option<String>,
    #[serde(default, alias = "name", alias = "fullName")]
    display_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    /// Name of the security profile the user is attached to.
    #[serde(default, alias = "profileName")]
    profile: Option<String>,
    #[serde(default)]
    modules: AccessList,
    #[serde(default)]
    menus: AccessList,
}

impl UserProfile {
    /// Creates a profile with the given username and no assignments.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Sets the module and menu assignments.
    #[must_use]
    pub fn with_access(mut self, modules: AccessList, menus: AccessList) -> Self {
        self.modules = modules;
        self.menus = menus;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }

    /// Returns the backend user id, if present.
    #[must_use]
    pub fn id(&self) -> Option<&EntityKey> {
        self.id.as_ref()
    }

    /// Returns the login name, if present.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the display name, if present.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email address, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the security profile name, if present.
    #[must_use]
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Returns the best available label for the user.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("User")
    }

    /// Returns the assigned modules.
    #[must_use]
    pub fn modules(&self) -> &AccessList {
        &self.modules
    }

    /// Returns the assigned menus.
    #[must_use]
    pub fn menus(&self) -> &AccessList {
        &self.menus
    }
}
