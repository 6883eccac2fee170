//! paydesk admin console.
//!
//! This crate provides the Leptos-based dashboard for the paydesk payment
//! and token-management platform: sign-in, the navigation shell built from
//! each user's module and menu assignments, and the admin screens.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod error;
pub mod navigation;
pub mod pages;
pub mod types;

#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod server_helpers;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
