//! Route generation from the resolved tree.
//!
//! Static routes are always present and always win. Dynamic routes come from
//! the resolved tree: one per leaf module and one per menu.

use crate::model::ResolvedModuleNode;
use crate::paths::{self, DASHBOARD_ROOT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Default landing page inside the dashboard.
pub const LANDING_PATH: &str = "/dashboard/home";

/// Screens with a dedicated component in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Login,
    Home,
    Settings,
    Profiles,
    Users,
    SecurityPolicy,
    RiskManagement,
    StepUp,
    FraudTeam,
    CallCenter,
    Chargebacks,
    Transactions,
}

impl Screen {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Home => "Home",
            Self::Settings => "Settings",
            Self::Profiles => "Profiles",
            Self::Users => "Users",
            Self::SecurityPolicy => "Security Policy",
            Self::RiskManagement => "Risk Management",
            Self::StepUp => "Step Up",
            Self::FraudTeam => "Fraud Team",
            Self::CallCenter => "Call Center",
            Self::Chargebacks => "Chargebacks",
            Self::Transactions => "Transactions",
        }
    }
}

/// Known dashboard screens by path.
const SCREENS: &[(&str, Screen)] = &[
    ("/dashboard/home", Screen::Home),
    ("/dashboard/settings", Screen::Settings),
    ("/dashboard/administration/profiles", Screen::Profiles),
    ("/dashboard/administration/users", Screen::Users),
    ("/dashboard/administration/security-policy", Screen::SecurityPolicy),
    ("/dashboard/token-manager/risk-management", Screen::RiskManagement),
    ("/dashboard/token-manager/step-up", Screen::StepUp),
    ("/dashboard/token-manager/fraud-team", Screen::FraudTeam),
    ("/dashboard/token-manager/call-center", Screen::CallCenter),
    ("/dashboard/issuer-tsp/chargebacks", Screen::Chargebacks),
    ("/dashboard/issuer-tsp/transactions", Screen::Transactions),
];

/// What a route renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenRef {
    /// A dedicated component.
    Screen { screen: Screen },
    /// A redirect to another path.
    Redirect { to: String },
    /// The generic placeholder, labeled with the node's title.
    Placeholder { title: String },
}

/// Where a route came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOrigin {
    Static,
    Dynamic,
}

/// A path the console can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigableRoute {
    pub path: String,
    pub screen: ScreenRef,
    pub title: String,
    pub origin: RouteOrigin,
}

impl NavigableRoute {
    fn fixed(path: &str, screen: Screen) -> Self {
        Self {
            path: path.to_string(),
            screen: ScreenRef::Screen { screen },
            title: screen.title().to_string(),
            origin: RouteOrigin::Static,
        }
    }

    fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            screen: ScreenRef::Redirect { to: to.to_string() },
            title: String::new(),
            origin: RouteOrigin::Static,
        }
    }

    fn dynamic(path: &str, title: &str) -> Self {
        let screen = SCREENS
            .iter()
            .find(|(known, _)| *known == path)
            .map_or_else(
                || ScreenRef::Placeholder {
                    title: title.to_string(),
                },
                |(_, screen)| ScreenRef::Screen { screen: *screen },
            );
        Self {
            path: path.to_string(),
            screen,
            title: title.to_string(),
            origin: RouteOrigin::Dynamic,
        }
    }
}

/// Returns the routes that exist regardless of access.
#[must_use]
pub fn static_routes() -> Vec<NavigableRoute> {
    let mut routes = vec![
        NavigableRoute::redirect("/", DASHBOARD_ROOT),
        NavigableRoute::fixed("/login", Screen::Login),
        NavigableRoute::redirect(DASHBOARD_ROOT, LANDING_PATH),
    ];
    routes.extend(
        SCREENS
            .iter()
            .map(|(path, screen)| NavigableRoute::fixed(path, *screen)),
    );
    routes
}

/// Generates dynamic routes from a resolved tree.
///
/// A module with no menus gets a route at its own path; otherwise each menu
/// gets one.
#[must_use]
pub fn generate_routes(tree: &[ResolvedModuleNode]) -> Vec<NavigableRoute> {
    let mut routes = Vec::new();
    for module in tree {
        if module.submodules.is_empty() {
            routes.push(NavigableRoute::dynamic(&module.path, &module.title));
        } else {
            routes.extend(
                module
                    .submodules
                    .iter()
                    .map(|menu| NavigableRoute::dynamic(&menu.path, &menu.title)),
            );
        }
    }
    routes
}

/// Static and dynamic routes merged, static first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    routes: Vec<NavigableRoute>,
}

impl RouteTable {
    /// Merges the static routes with the routes generated from `tree`.
    ///
    /// A dynamic route whose path is already taken is dropped.
    #[must_use]
    pub fn build(tree: &[ResolvedModuleNode]) -> Self {
        let mut routes = static_routes();
        let mut taken: BTreeSet<String> = routes.iter().map(|r| r.path.clone()).collect();

        for route in generate_routes(tree) {
            if taken.insert(route.path.clone()) {
                routes.push(route);
            } else {
                debug!(path = %route.path, "dynamic route shadowed by an existing route");
            }
        }

        Self { routes }
    }

    /// Returns the route for a browser location, if any.
    #[must_use]
    pub fn find(&self, location: &str) -> Option<&NavigableRoute> {
        let location = paths::normalize_location(location);
        self.routes.iter().find(|r| r.path == location)
    }

    #[must_use]
    pub fn routes(&self) -> &[NavigableRoute] {
        &self.routes
    }

    /// Returns only the routes generated from the access tree.
    pub fn dynamic_routes(&self) -> impl Iterator<Item = &NavigableRoute> {
        self.routes
            .iter()
            .filter(|r| r.origin == RouteOrigin::Dynamic)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResolvedMenuNode;
    use paydesk_core::EntityKey;

    fn node(id: i64, title: &str, path: &str, menus: &[(i64, &str, &str)]) -> ResolvedModuleNode {
        ResolvedModuleNode {
            id: EntityKey::Numeric(id),
            code: title.to_lowercase(),
            title: title.to_string(),
            icon: None,
            path: path.to_string(),
            submodules: menus
                .iter()
                .map(|(id, title, path)| ResolvedMenuNode {
                    id: EntityKey::Numeric(*id),
                    code: title.to_lowercase(),
                    title: (*title).to_string(),
                    path: (*path).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn static_routes_cover_shell_and_known_screens() {
        let routes = static_routes();
        let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
        for expected in [
            "/",
            "/login",
            "/dashboard",
            "/dashboard/settings",
            "/dashboard/administration/users",
            "/dashboard/token-manager/step-up",
            "/dashboard/issuer-tsp/transactions",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
        assert!(routes.iter().all(|r| r.origin == RouteOrigin::Static));
    }

    #[test]
    fn dashboard_index_redirects_to_landing() {
        let table = RouteTable::build(&[]);
        let index = table.find("/dashboard").expect("index route");
        assert_eq!(
            index.screen,
            ScreenRef::Redirect {
                to: LANDING_PATH.to_string()
            }
        );
    }

    #[test]
    fn leaf_module_routes_to_itself() {
        let tree = [node(5, "Reports", "/dashboard/reports", &[])];
        let routes = generate_routes(&tree);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/dashboard/reports");
        assert_eq!(
            routes[0].screen,
            ScreenRef::Placeholder {
                title: "Reports".to_string()
            }
        );
    }

    #[test]
    fn each_menu_gets_a_route() {
        let tree = [node(
            1,
            "Token Manager",
            "/dashboard/token-manager",
            &[
                (10, "Risk Mgmt", "/dashboard/token-manager/risk-management"),
                (11, "Velocity", "/dashboard/token-manager/velocity"),
            ],
        )];
        let routes = generate_routes(&tree);
        assert_eq!(routes.len(), 2);
        assert_eq!(
            routes[0].screen,
            ScreenRef::Screen {
                screen: Screen::RiskManagement
            }
        );
        assert_eq!(
            routes[1].screen,
            ScreenRef::Placeholder {
                title: "Velocity".to_string()
            }
        );
    }

    #[test]
    fn static_routes_win_on_collision() {
        let tree = [node(
            1,
            "Token Manager",
            "/dashboard/token-manager",
            &[(10, "Risk Mgmt", "/dashboard/token-manager/risk-management")],
        )];
        let table = RouteTable::build(&tree);
        let route = table
            .find("/dashboard/token-manager/risk-management")
            .expect("route");
        assert_eq!(route.origin, RouteOrigin::Static);
        assert_eq!(table.dynamic_routes().count(), 0);
        assert_eq!(table.len(), static_routes().len());
    }

    #[test]
    fn dynamic_routes_are_appended_once() {
        let tree = [
            node(5, "Reports", "/dashboard/reports", &[]),
            node(6, "Reports", "/dashboard/reports", &[]),
        ];
        let table = RouteTable::build(&tree);
        assert_eq!(table.dynamic_routes().count(), 1);
        let route = table.find("/dashboard/reports/").expect("trailing slash");
        assert_eq!(route.origin, RouteOrigin::Dynamic);
        assert!(table.find("/dashboard/unknown").is_none());
    }
}
