//! Navigation server functions.
//!
//! The dashboard shell fetches its navigation once per page load through
//! [`get_navigation`]. [`reload_navigation`] re-reads the user's profile and
//! the catalog from the backend, for when assignments changed mid-session.

use crate::types::NavigationView;
use leptos::prelude::*;

/// Server function to get the current user's navigation.
///
/// Returns `None` when there is no valid session, so the shell can send the
/// user to the login page.
#[server]
pub async fn get_navigation() -> Result<Option<NavigationView>, ServerFnError> {
    use crate::server_helpers::get_authenticated_session;

    let auth = match get_authenticated_session().await {
        Ok(auth) => auth,
        Err(e) => {
            tracing::debug!(error = %e, "No navigation without a session");
            return Ok(None);
        }
    };

    let Some(catalog) = auth.state.session_catalog(&auth.session).await else {
        tracing::debug!(session_id = %auth.session.id(), "Catalog closed, treating as signed out");
        return Ok(None);
    };

    Ok(Some(build_view(auth.session.profile(), &catalog)))
}

/// Server function to re-fetch the user's profile and catalog.
#[server]
pub async fn reload_navigation() -> Result<NavigationView, ServerFnError> {
    use crate::server_helpers::get_authenticated_session;

    let auth = get_authenticated_session()
        .await
        .map_err(|e| e.into_server_error())?;
    let (session, catalog) = auth
        .state
        .reload_session(auth.session)
        .await
        .map_err(|e| e.into_server_error())?;

    tracing::info!(
        session_id = %session.id(),
        modules = catalog.modules().len(),
        menus = catalog.menus().len(),
        "Reloaded navigation"
    );

    Ok(build_view(session.profile(), &catalog))
}

/// Resolves a profile's assignments against a catalog into the shell's view.
#[cfg(feature = "ssr")]
pub fn build_view(
    profile: &paydesk_session::UserProfile,
    catalog: &paydesk_navigation::Catalog,
) -> NavigationView {
    use crate::types::UserInfo;
    use paydesk_navigation::{CapabilitySet, RouteTable, UserAccessSet, resolve};

    let access = UserAccessSet::new(profile.modules().clone(), profile.menus().clone());
    let resolution = resolve(&access, catalog);
    if !resolution.unassigned.is_empty() {
        tracing::debug!(
            unassigned = resolution.unassigned.len(),
            "Menus without a module are hidden from navigation"
        );
    }

    NavigationView {
        user: UserInfo {
            label: profile.label().to_string(),
            username: profile.username().map(str::to_string),
            email: profile.email().map(str::to_string),
            profile_name: profile.profile_name().map(str::to_string),
        },
        routes: RouteTable::build(&resolution.modules),
        capabilities: CapabilitySet::from_access(&access, catalog),
        modules: resolution.modules,
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use paydesk_navigation::{Catalog, Menu, Module, RouteOrigin};
    use paydesk_session::UserProfile;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Module::new(1, "lcm", "Token Manager"),
                Module::new(2, "itcp", "Issuer TSP"),
                Module::new(4, "reports", "Reports"),
            ],
            vec![
                Menu::new(10, "risk_mgmt", "Risk Mgmt").with_module_code("lcm"),
                Menu::new(20, "chargebacks", "Chargebacks").with_module_id(2),
            ],
        )
    }

    fn profile(json: &str) -> UserProfile {
        serde_json::from_str(json).expect("profile")
    }

    #[test]
    fn view_reflects_assigned_modules() {
        let view = build_view(
            &profile(r#"{"username": "alice", "modules": "[1, 4]", "menus": "[10]"}"#),
            &catalog(),
        );

        assert_eq!(view.user.label, "alice");
        assert_eq!(view.modules.len(), 2);
        assert!(view.capabilities.has_access("LCM"));
        assert!(!view.capabilities.has_access("itcp"));

        let reports = view.routes.find("/dashboard/reports").expect("leaf module route");
        assert_eq!(reports.origin, RouteOrigin::Dynamic);
        assert!(
            view.routes
                .find("/dashboard/token-manager/risk-management")
                .is_some()
        );
    }

    #[test]
    fn unrestricted_profile_sees_whole_catalog() {
        let view = build_view(&profile(r#"{"username": "root"}"#), &catalog());
        assert_eq!(view.modules.len(), 3);
        assert!(view.capabilities.has_any(&["lcm", "itcp", "reports"]));
    }

    #[test]
    fn empty_catalog_still_renders_static_routes() {
        let view = build_view(&profile(r#"{"username": "alice"}"#), &Catalog::empty());
        assert!(view.modules.is_empty());
        assert!(view.routes.find("/dashboard/settings").is_some());
        assert!(view.capabilities.is_empty());
    }
}
