//! Core types shared across the paydesk admin console.
//!
//! This crate provides the pieces every other crate leans on:
//! the rootcause-backed `Result` alias, the normalized [`EntityKey`]
//! used to compare backend identifiers, and the [`AccessList`] that turns
//! the many shapes a user's module/menu assignments arrive in into one
//! tagged representation.

pub mod access;
pub mod error;
pub mod id;

pub use access::{AccessEntry, AccessList, EmbeddedObject};
pub use error::Result;
pub use id::{EntityKey, ParseKeyError};
