//! Catalog entities and the resolved navigation tree.

use paydesk_core::EntityKey;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A top-level functional area of the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Backend identifier.
    pub id: EntityKey,
    /// Stable machine key (e.g. `lcm`).
    pub code: String,
    /// Human-readable title.
    #[serde(alias = "name")]
    pub title: String,
    /// Icon name for the sidebar.
    #[serde(default)]
    pub icon: Option<String>,
    /// Backend-supplied path segment, overriding the code table.
    #[serde(default)]
    pub path: Option<String>,
}

impl Module {
    /// Creates a module without icon or explicit path.
    #[must_use]
    pub fn new(id: impl Into<EntityKey>, code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: title.into(),
            icon: None,
            path: None,
        }
    }

    /// Sets the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets an explicit path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Synthesizes a labeled stand-in for an identifier the catalog does not know.
    #[must_use]
    pub fn placeholder(id: &EntityKey) -> Self {
        Self::new(id.clone(), format!("MODULE_{id}"), format!("Module {id}"))
    }

    /// Returns true if `key` names this module, by id or by code.
    #[must_use]
    pub fn is_named_by(&self, key: &EntityKey) -> bool {
        *key == self.id || key.matches_code(&self.code)
    }
}

/// A navigable screen nested under a module.
///
/// The parent module may be referenced through any of `moduleId`,
/// `moduleCode`, or `module`; the backend is not consistent about which one
/// it fills in, so all three are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    /// Backend identifier.
    pub id: EntityKey,
    /// Stable machine key (e.g. `risk_mgmt`).
    pub code: String,
    /// Human-readable title.
    #[serde(alias = "name")]
    pub title: String,
    /// Parent module id.
    #[serde(default, deserialize_with = "lenient_key", skip_serializing_if = "Option::is_none")]
    pub module_id: Option<EntityKey>,
    /// Parent module code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_code: Option<String>,
    /// Parent module as an id, a code, or an embedded object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<Value>,
}

fn lenient_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<EntityKey>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(EntityKey::from_value))
}

impl Menu {
    /// Creates a menu with no module linkage.
    #[must_use]
    pub fn new(id: impl Into<EntityKey>, code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: title.into(),
            module_id: None,
            module_code: None,
            module: None,
        }
    }

    /// Links the menu to a module by id.
    #[must_use]
    pub fn with_module_id(mut self, id: impl Into<EntityKey>) -> Self {
        self.module_id = Some(id.into());
        self
    }

    /// Links the menu to a module by code.
    #[must_use]
    pub fn with_module_code(mut self, code: impl Into<String>) -> Self {
        self.module_code = Some(code.into());
        self
    }

    /// Links the menu through the loosely-typed `module` field.
    #[must_use]
    pub fn with_module(mut self, module: Value) -> Self {
        self.module = Some(module);
        self
    }

    /// Synthesizes a labeled stand-in for an identifier the catalog does not know.
    #[must_use]
    pub fn placeholder(id: &EntityKey) -> Self {
        Self::new(id.clone(), format!("MENU_{id}"), format!("Menu {id}"))
    }

    /// Returns true if any of the three linking fields points at `module`.
    #[must_use]
    pub fn links_to(&self, module: &Module) -> bool {
        if self
            .module_id
            .as_ref()
            .is_some_and(|key| module.is_named_by(key))
        {
            return true;
        }

        if self
            .module_code
            .as_deref()
            .is_some_and(|code| code.trim().eq_ignore_ascii_case(module.code.trim()))
        {
            return true;
        }

        match &self.module {
            Some(Value::Object(fields)) => {
                fields
                    .get("id")
                    .and_then(EntityKey::from_value)
                    .is_some_and(|key| module.is_named_by(&key))
                    || fields
                        .get("code")
                        .and_then(Value::as_str)
                        .is_some_and(|code| code.trim().eq_ignore_ascii_case(module.code.trim()))
            }
            Some(other) => EntityKey::from_value(other).is_some_and(|key| module.is_named_by(&key)),
            None => false,
        }
    }

    /// Returns true if none of the linking fields is populated.
    #[must_use]
    pub fn has_no_link(&self) -> bool {
        self.module_id.is_none()
            && self.module_code.as_deref().is_none_or(|c| c.trim().is_empty())
            && self.module.as_ref().is_none_or(Value::is_null)
    }
}

/// The full server-declared set of modules and menus.
///
/// A catalog is an immutable snapshot; reloading produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    modules: Vec<Module>,
    menus: Vec<Menu>,
}

impl Catalog {
    /// Creates a catalog snapshot.
    #[must_use]
    pub fn new(modules: Vec<Module>, menus: Vec<Menu>) -> Self {
        Self { modules, menus }
    }

    /// Creates an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the modules in backend order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Returns the menus in backend order.
    #[must_use]
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Returns true if the catalog has neither modules nor menus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.menus.is_empty()
    }

    /// Looks up a module by id.
    #[must_use]
    pub fn module(&self, id: &EntityKey) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == *id)
    }

    /// Looks up a menu by id.
    #[must_use]
    pub fn menu(&self, id: &EntityKey) -> Option<&Menu> {
        self.menus.iter().find(|m| m.id == *id)
    }

    /// Splits the snapshot into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Module>, Vec<Menu>) {
        (self.modules, self.menus)
    }
}

/// A module in the resolved tree, with its derived path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModuleNode {
    pub id: EntityKey,
    pub code: String,
    pub title: String,
    pub icon: Option<String>,
    /// Absolute path, e.g. `/dashboard/token-manager`.
    pub path: String,
    pub submodules: Vec<ResolvedMenuNode>,
}

impl ResolvedModuleNode {
    /// Returns true if `location` is this module's path or lies below it.
    #[must_use]
    pub fn contains(&self, location: &str) -> bool {
        let location = location.trim_end_matches('/');
        location == self.path
            || location
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// A menu in the resolved tree, with its derived path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMenuNode {
    pub id: EntityKey,
    pub code: String,
    pub title: String,
    /// Absolute path, e.g. `/dashboard/token-manager/risk-management`.
    pub path: String,
}
