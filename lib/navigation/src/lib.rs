//! Navigation model for the paydesk console.
//!
//! The backend declares a catalog of modules (top-level areas such as
//! Administration or Token Manager) and menus (screens inside a module).
//! Each user is assigned a subset of both. This crate turns a catalog
//! snapshot and a user's assignments into:
//!
//! - a path-annotated module/menu tree ([`resolver::resolve`])
//! - the set of navigable routes, merged with the always-present static
//!   routes ([`routes::RouteTable`])
//! - a capability set used to show or hide sidebar sections
//!   ([`capability::CapabilitySet`])
//!
//! Everything here is pure and synchronous: the same inputs always produce
//! the same tree, in the same order.
//!
//! # Example
//!
//! ```
//! use paydesk_core::AccessList;
//! use paydesk_navigation::{Catalog, Menu, Module, RouteTable, UserAccessSet, resolve};
//!
//! let catalog = Catalog::new(
//!     vec![Module::new(1, "lcm", "Token Manager")],
//!     vec![Menu::new(10, "risk_mgmt", "Risk Mgmt").with_module_code("LCM")],
//! );
//! let access = UserAccessSet::new(AccessList::from_keys([1_i64]), AccessList::from_keys([10_i64]));
//!
//! let resolution = resolve(&access, &catalog);
//! let module = &resolution.modules[0];
//! assert_eq!(module.path, "/dashboard/token-manager");
//! assert_eq!(module.submodules[0].path, "/dashboard/token-manager/risk-management");
//!
//! let routes = RouteTable::build(&resolution.modules);
//! assert!(routes.find("/dashboard/token-manager/risk-management").is_some());
//! ```

pub mod capability;
pub mod model;
pub mod paths;
pub mod resolver;
pub mod routes;

pub use capability::CapabilitySet;
pub use model::{Catalog, Menu, Module, ResolvedMenuNode, ResolvedModuleNode};
pub use resolver::{Resolution, UserAccessSet, resolve, resolve_access};
pub use routes::{
    NavigableRoute, RouteOrigin, RouteTable, Screen, ScreenRef, generate_routes, static_routes,
};
