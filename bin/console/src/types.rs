//! Shared types used across server functions and UI components.

use paydesk_navigation::{CapabilitySet, ResolvedModuleNode, RouteTable};

/// User info for display in the UI.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// Best available label (display name, username, or email).
    pub label: String,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Security profile the user belongs to.
    pub profile_name: Option<String>,
}

/// Everything the dashboard shell needs to render navigation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct NavigationView {
    pub user: UserInfo,
    /// Accessible modules, in sidebar order.
    pub modules: Vec<ResolvedModuleNode>,
    pub routes: RouteTable,
    pub capabilities: CapabilitySet,
}
