//! Capability checks used to show or hide sidebar sections.
//!
//! These checks decide visibility only. Route access is determined by the
//! route table.

use crate::model::Catalog;
use crate::paths;
use crate::resolver::{UserAccessSet, accessible_modules};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The module keys a user can see.
///
/// A module is registered under its code and under its URL segment, so both
/// `lcm` and `token-manager` answer for the Token Manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    codes: BTreeSet<String>,
}

impl CapabilitySet {
    /// Builds the set from the user's module assignments.
    ///
    /// Assignments are looked up in the catalog the same way the resolver
    /// does, so an empty module list grants every catalog module and an
    /// unknown id grants only its placeholder code.
    #[must_use]
    pub fn from_access(access: &UserAccessSet, catalog: &Catalog) -> Self {
        let mut codes = BTreeSet::new();
        for module in accessible_modules(&access.modules, catalog) {
            codes.insert(module.code.trim().to_ascii_lowercase());
            codes.insert(paths::module_segment(&module.code));
            if let Some(segment) = paths::module_path(&module).rsplit('/').next() {
                codes.insert(segment.to_ascii_lowercase());
            }
        }
        Self { codes }
    }

    /// Returns true if the user can see the module named by `key`.
    #[must_use]
    pub fn has_access(&self, key: &str) -> bool {
        self.codes.contains(&key.trim().to_ascii_lowercase())
    }

    /// Returns true if the user can see at least one of `keys`.
    #[must_use]
    pub fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.has_access(key))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Module;
    use paydesk_core::AccessList;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Module::new(1, "LCM", "Token Manager"),
                Module::new(2, "itcp", "Issuer TSP"),
                Module::new(3, "administration", "Administration"),
                Module::new(4, "reports", "Reports").with_path("/dashboard/insights"),
            ],
            Vec::new(),
        )
    }

    fn capabilities() -> CapabilitySet {
        let access = UserAccessSet::new(AccessList::from_keys([1_i64, 3]), AccessList::empty());
        CapabilitySet::from_access(&access, &catalog())
    }

    #[test]
    fn codes_match_case_insensitively() {
        let caps = capabilities();
        assert!(caps.has_access("lcm"));
        assert!(caps.has_access("LCM"));
        assert!(caps.has_access(" Administration "));
    }

    #[test]
    fn url_segments_are_accepted() {
        assert!(capabilities().has_access("token-manager"));
    }

    #[test]
    fn unassigned_modules_are_hidden() {
        let caps = capabilities();
        assert!(!caps.has_access("itcp"));
        assert!(!caps.has_access("issuer-tsp"));
        assert!(caps.has_any(&["itcp", "lcm"]));
        assert!(!caps.has_any(&["itcp"]));
    }

    #[test]
    fn modules_granted_by_code_are_recognized() {
        let access = UserAccessSet::new(AccessList::from_keys(["ITCP"]), AccessList::empty());
        let caps = CapabilitySet::from_access(&access, &catalog());
        assert!(caps.has_access("itcp"));
        assert!(!caps.has_access("lcm"));
    }

    #[test]
    fn backend_path_segment_is_accepted() {
        let access = UserAccessSet::new(AccessList::from_keys([4_i64]), AccessList::empty());
        let caps = CapabilitySet::from_access(&access, &catalog());
        assert!(caps.has_access("reports"));
        assert!(caps.has_access("insights"));
    }

    #[test]
    fn unrestricted_access_grants_whole_catalog() {
        let caps = CapabilitySet::from_access(&UserAccessSet::unrestricted(), &catalog());
        assert!(caps.has_access("lcm"));
        assert!(caps.has_access("itcp"));
        assert!(caps.has_access("administration"));
    }

    #[test]
    fn unknown_id_grants_only_its_placeholder() {
        let access = UserAccessSet::new(AccessList::from_keys([99_i64]), AccessList::empty());
        let caps = CapabilitySet::from_access(&access, &catalog());
        assert!(caps.has_access("MODULE_99"));
        assert!(!caps.has_access("lcm"));
    }

    #[test]
    fn empty_catalog_with_no_assignments_grants_nothing() {
        let caps = CapabilitySet::from_access(&UserAccessSet::unrestricted(), &Catalog::empty());
        assert!(caps.is_empty());
        assert!(!caps.has_access("lcm"));
    }
}
