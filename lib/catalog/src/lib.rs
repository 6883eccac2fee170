//! Backend access and catalog caching for the paydesk console.
//!
//! This crate provides:
//! - `BackendConfig`: where the backend lives and how patiently to talk to it
//! - `CatalogSource`: the backend operations the console depends on, with
//!   `HttpBackend` as the reqwest implementation
//! - `FetchError`: the structured reason a fetch failed
//! - `CatalogStore`: a per-session catalog snapshot with stale-result
//!   protection, and `CatalogRegistry` to own one per session
//!
//! Fetch failures never escape [`CatalogStore::load`]; callers always get a
//! catalog back, possibly empty or stale.

pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use client::{CatalogSource, HttpBackend};
pub use config::{BackendConfig, RetryPolicy};
pub use error::FetchError;
pub use store::{CatalogRegistry, CatalogStore};
