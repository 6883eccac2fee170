//! Page components for the console.
//!
//! Dashboard pages render inside the shell and read the session's
//! [`NavigationView`](crate::types::NavigationView) from context.

pub mod administration;
pub mod home;
pub mod issuer_tsp;
pub mod login;
pub mod placeholder;
pub mod settings;
pub mod token_manager;

pub use administration::{ProfilesPage, SecurityPolicyPage, UsersPage};
pub use home::HomePage;
pub use issuer_tsp::{ChargebacksPage, TransactionsPage};
pub use login::LoginPage;
pub use placeholder::PlaceholderPage;
pub use settings::SettingsPage;
pub use token_manager::{CallCenterPage, FraudTeamPage, RiskManagementPage, StepUpPage};
