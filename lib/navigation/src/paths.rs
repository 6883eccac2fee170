//! Derivation of URL paths from module and menu codes.

use crate::model::Module;

/// Mount point of every module and menu path.
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// Module codes whose URL segment differs from the lowercased code.
const MODULE_SEGMENTS: &[(&str, &str)] = &[("lcm", "token-manager"), ("itcp", "issuer-tsp")];

/// Menu codes whose URL segment differs from the lowercased code.
const MENU_SEGMENTS: &[(&str, &str)] = &[
    ("risk_mgmt", "risk-management"),
    ("step_up", "step-up"),
    ("fraud_team", "fraud-team"),
    ("call_center", "call-center"),
];

fn lookup(table: &[(&str, &str)], code: &str) -> String {
    let code = code.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |(_, segment)| (*segment).to_string())
}

/// Returns the URL segment for a module code.
#[must_use]
pub fn module_segment(code: &str) -> String {
    lookup(MODULE_SEGMENTS, code)
}

/// Returns the URL segment for a menu code.
#[must_use]
pub fn menu_segment(code: &str) -> String {
    lookup(MENU_SEGMENTS, code)
}

/// Returns the absolute path of a module.
///
/// A non-blank `path` from the backend takes precedence over the code table.
/// It may be given as a bare segment or as an absolute dashboard path.
#[must_use]
pub fn module_path(module: &Module) -> String {
    let explicit = module
        .path
        .as_deref()
        .map(|p| {
            let p = p.trim().trim_matches('/');
            p.strip_prefix("dashboard/").unwrap_or(p).to_string()
        })
        .filter(|p| !p.is_empty() && p != "dashboard");

    let segment = explicit.unwrap_or_else(|| module_segment(&module.code));
    format!("{DASHBOARD_ROOT}/{segment}")
}

/// Returns the absolute path of a menu under its module's path.
#[must_use]
pub fn menu_path(module_path: &str, menu_code: &str) -> String {
    format!(
        "{}/{}",
        module_path.trim_end_matches('/'),
        menu_segment(menu_code)
    )
}

/// Normalizes a browser location for comparison against route paths.
///
/// Strips the query string, the fragment, and any trailing slash (except on
/// the root).
#[must_use]
pub fn normalize_location(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_module_codes_use_the_table() {
        assert_eq!(module_segment("lcm"), "token-manager");
        assert_eq!(module_segment("LCM"), "token-manager");
        assert_eq!(module_segment("itcp"), "issuer-tsp");
    }

    #[test]
    fn unknown_codes_fall_back_to_lowercase() {
        assert_eq!(module_segment("Administration"), "administration");
        assert_eq!(menu_segment(" Users "), "users");
    }

    #[test]
    fn known_menu_codes_use_the_table() {
        assert_eq!(menu_segment("risk_mgmt"), "risk-management");
        assert_eq!(menu_segment("step_up"), "step-up");
        assert_eq!(menu_segment("fraud_team"), "fraud-team");
        assert_eq!(menu_segment("CALL_CENTER"), "call-center");
    }

    #[test]
    fn module_path_is_mounted_under_dashboard() {
        let module = Module::new(1, "lcm", "Token Manager");
        assert_eq!(module_path(&module), "/dashboard/token-manager");
    }

    #[test]
    fn backend_path_overrides_the_table() {
        let bare = Module::new(1, "lcm", "Token Manager").with_path("tokens");
        assert_eq!(module_path(&bare), "/dashboard/tokens");

        let absolute = Module::new(1, "lcm", "Token Manager").with_path("/dashboard/tokens/");
        assert_eq!(module_path(&absolute), "/dashboard/tokens");

        let blank = Module::new(1, "lcm", "Token Manager").with_path("  ");
        assert_eq!(module_path(&blank), "/dashboard/token-manager");
    }

    #[test]
    fn menu_path_appends_segment() {
        assert_eq!(
            menu_path("/dashboard/token-manager", "risk_mgmt"),
            "/dashboard/token-manager/risk-management"
        );
    }

    #[test]
    fn locations_are_normalized() {
        assert_eq!(normalize_location("/dashboard/home/"), "/dashboard/home");
        assert_eq!(normalize_location("/dashboard?x=1#top"), "/dashboard");
        assert_eq!(normalize_location(""), "/");
        assert_eq!(normalize_location("/"), "/");
        assert_eq!(normalize_location("login"), "/login");
    }
}
