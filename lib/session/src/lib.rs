//! Session and token handling for the paydesk console.
//!
//! This crate provides:
//! - `AuthToken`: the backend-issued bearer token and its expiry
//! - `UserProfile`: the authenticated user's profile, including the
//!   modules and menus assigned to them
//! - `Session`, `SessionId`: one signed-in browser session
//! - `SessionStore`: the explicitly owned, in-memory session registry
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use paydesk_session::{AuthToken, Session, SessionId, SessionStore, UserProfile};
//!
//! let profile: UserProfile = serde_json::from_str(
//!     r#"{"username": "alice", "modules": "[1, 2]", "menus": [10]}"#,
//! ).unwrap();
//! let token = AuthToken::new("opaque-token".to_string(), Duration::minutes(30));
//! let session = Session::new(SessionId::generate(), token, profile);
//!
//! let store = SessionStore::new();
//! let id = session.id().clone();
//! store.insert(session);
//!
//! let session = store.get(&id).unwrap();
//! assert!(session.is_valid());
//! assert_eq!(session.profile().modules().len(), 2);
//! ```

pub mod error;
pub mod profile;
pub mod session;
pub mod store;
pub mod token;

pub use error::AuthenticationError;
pub use profile::UserProfile;
pub use session::{Session, SessionId};
pub use store::SessionStore;
pub use token::AuthToken;
