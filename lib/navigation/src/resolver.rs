//! Resolution of a user's access set against a catalog snapshot.
//!
//! [`resolve`] is a pure function: it reads the access set and the catalog,
//! allocates a fresh tree, and never touches shared state. Iteration only
//! ever walks `Vec`s, so the output order is fully determined by the input
//! order.

use crate::model::{Catalog, Menu, Module, ResolvedMenuNode, ResolvedModuleNode};
use crate::paths;
use paydesk_core::{AccessEntry, AccessList, EntityKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// The modules and menus assigned to a user.
///
/// An empty list means no restriction is configured for that kind, and the
/// whole catalog applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccessSet {
    pub modules: AccessList,
    pub menus: AccessList,
}

impl UserAccessSet {
    #[must_use]
    pub fn new(modules: AccessList, menus: AccessList) -> Self {
        Self { modules, menus }
    }

    /// An access set with no restrictions.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.modules.is_empty() && self.menus.is_empty()
    }
}

/// Output of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Accessible modules in resolved order, each with its accessible menus.
    pub modules: Vec<ResolvedModuleNode>,
    /// Accessible menus that link to no known module.
    pub unassigned: Vec<Menu>,
}

/// Resolves an access set into a navigation tree.
#[must_use]
pub fn resolve(access: &UserAccessSet, catalog: &Catalog) -> Resolution {
    resolve_lists(&access.modules, &access.menus, catalog)
}

/// Resolves module and menu access lists into the module tree.
///
/// Same as [`resolve`] without the unassigned bucket.
#[must_use]
pub fn resolve_access(
    user_modules: &AccessList,
    user_menus: &AccessList,
    catalog: &Catalog,
) -> Vec<ResolvedModuleNode> {
    resolve_lists(user_modules, user_menus, catalog).modules
}

fn resolve_lists(user_modules: &AccessList, user_menus: &AccessList, catalog: &Catalog) -> Resolution {
    let modules = accessible_modules(user_modules, catalog);
    let menus = accessible_menus(user_menus, catalog);

    let mut used_paths = BTreeSet::new();
    let mut nodes: Vec<ResolvedModuleNode> = modules
        .iter()
        .map(|module| {
            let path = unique_path(paths::module_path(module), &module.id, &mut used_paths);
            ResolvedModuleNode {
                id: module.id.clone(),
                code: module.code.clone(),
                title: module.title.clone(),
                icon: module.icon.clone(),
                path,
                submodules: Vec::new(),
            }
        })
        .collect();

    let mut menu_paths: Vec<BTreeSet<String>> = vec![BTreeSet::new(); nodes.len()];
    let mut unassigned = Vec::new();

    for menu in menus {
        let Some(index) = modules.iter().position(|module| menu.links_to(module)) else {
            if catalog.modules().iter().any(|module| menu.links_to(module)) {
                debug!(menu_id = %menu.id, code = %menu.code, "menu belongs to a module outside the access set");
            } else {
                warn!(menu_id = %menu.id, code = %menu.code, "menu is not linked to any module");
                unassigned.push(menu);
            }
            continue;
        };

        let node = &mut nodes[index];
        let path = unique_path(
            paths::menu_path(&node.path, &menu.code),
            &menu.id,
            &mut menu_paths[index],
        );
        node.submodules.push(ResolvedMenuNode {
            id: menu.id,
            code: menu.code,
            title: menu.title,
            path,
        });
    }

    debug!(
        modules = nodes.len(),
        unassigned = unassigned.len(),
        "resolved navigation tree"
    );

    Resolution {
        modules: nodes,
        unassigned,
    }
}

pub(crate) fn accessible_modules(access: &AccessList, catalog: &Catalog) -> Vec<Module> {
    if access.is_empty() {
        return catalog.modules().to_vec();
    }

    let mut seen = BTreeSet::new();
    let mut modules = Vec::with_capacity(access.len());
    for entry in access {
        let resolved = resolve_entry(
            entry,
            |key| {
                catalog
                    .modules()
                    .iter()
                    .find(|module| module.is_named_by(key))
                    .cloned()
            },
            Module::placeholder,
        );
        if let Some(module) = resolved {
            if seen.insert(module.id.clone()) {
                modules.push(module);
            }
        }
    }
    modules
}

fn accessible_menus(access: &AccessList, catalog: &Catalog) -> Vec<Menu> {
    if access.is_empty() {
        return catalog.menus().to_vec();
    }

    let mut seen = BTreeSet::new();
    let mut menus = Vec::with_capacity(access.len());
    for entry in access {
        let resolved = resolve_entry(
            entry,
            |key| {
                catalog
                    .menus()
                    .iter()
                    .find(|menu| menu.id == *key || key.matches_code(&menu.code))
                    .cloned()
            },
            Menu::placeholder,
        );
        if let Some(menu) = resolved {
            if seen.insert(menu.id.clone()) {
                menus.push(menu);
            }
        }
    }
    menus
}

/// Turns one access entry into a catalog item.
///
/// Known keys resolve to the catalog copy. Embedded objects the catalog does
/// not know are used as delivered. Anything else with a key becomes a
/// placeholder; entries without a usable key are dropped.
fn resolve_entry<T, F, P>(entry: &AccessEntry, find: F, placeholder: P) -> Option<T>
where
    T: DeserializeOwned,
    F: Fn(&EntityKey) -> Option<T>,
    P: Fn(&EntityKey) -> T,
{
    match entry {
        AccessEntry::Identifier(key) => Some(find(key).unwrap_or_else(|| {
            debug!(id = %key, "identifier not in catalog, using placeholder");
            placeholder(key)
        })),
        AccessEntry::Resolved(object) => {
            let key = object.key();
            if let Some(found) = key.as_ref().and_then(&find) {
                return Some(found);
            }
            match serde_json::from_value::<T>(object.to_value()) {
                Ok(item) => Some(item),
                Err(e) => match key {
                    Some(key) => {
                        debug!(id = %key, error = %e, "embedded object incomplete, using placeholder");
                        Some(placeholder(&key))
                    }
                    None => {
                        warn!(error = %e, "skipping embedded object without identifier");
                        None
                    }
                },
            }
        }
    }
}

fn unique_path(base: String, id: &EntityKey, used: &mut BTreeSet<String>) -> String {
    let mut candidate = base.clone();
    let mut attempt = 1;
    while used.contains(&candidate) {
        candidate = if attempt == 1 {
            format!("{base}-{id}")
        } else {
            format!("{base}-{id}-{attempt}")
        };
        attempt += 1;
    }
    if candidate != base {
        warn!(path = %base, renamed = %candidate, "path collision, disambiguating");
    }
    used.insert(candidate.clone());
    candidate
}
