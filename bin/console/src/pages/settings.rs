//! Settings page component.

use crate::navigation::ReloadNavigation;
use crate::types::{NavigationView, UserInfo};
use leptos::prelude::*;

/// User settings page.
#[component]
pub fn SettingsPage() -> impl IntoView {
    match use_context::<NavigationView>() {
        Some(nav) => view! {
            <div class="settings-page">
                <h1>"Settings"</h1>
                <SettingsContent user_info=nav.user module_count=nav.modules.len()/>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="settings-page">
                <p>"Failed to load settings. Please try again."</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn SettingsContent(user_info: UserInfo, module_count: usize) -> impl IntoView {
    let reload = use_context::<ServerAction<ReloadNavigation>>();
    let (reload_message, set_reload_message) = signal(Option::<String>::None);

    Effect::new(move || {
        if let Some(result) = reload.and_then(|action| action.value().get()) {
            match result {
                Ok(nav) => set_reload_message.set(Some(format!(
                    "Access refreshed: {} modules available.",
                    nav.modules.len()
                ))),
                Err(e) => set_reload_message.set(Some(format!("Error: {}", e))),
            }
        }
    });

    let not_set = || "Not set".to_string();

    view! {
        <div class="settings-content">
            <section class="settings-section">
                <h2>"Profile"</h2>
                <div class="setting-row">
                    <label>"Username"</label>
                    <span>{user_info.username.unwrap_or_else(not_set)}</span>
                </div>
                <div class="setting-row">
                    <label>"Email"</label>
                    <span>{user_info.email.unwrap_or_else(not_set)}</span>
                </div>
                <div class="setting-row">
                    <label>"Security profile"</label>
                    <span>{user_info.profile_name.unwrap_or_else(not_set)}</span>
                </div>
            </section>

            <section class="settings-section">
                <h2>"Access"</h2>
                <p>{format!("{module_count} modules assigned.")}</p>
                <button
                    type="button"
                    disabled=move || reload.is_none_or(|action| action.pending().get())
                    on:click=move |_| {
                        if let Some(action) = reload {
                            action.dispatch(ReloadNavigation {});
                        }
                    }
                >
                    "Refresh access"
                </button>
                {move || reload_message.get().map(|msg| view! { <p class="save-message">{msg}</p> })}
            </section>
        </div>
    }
}
