//! Administration screens.

use crate::components::ScreenFrame;
use leptos::prelude::*;

#[component]
pub fn ProfilesPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Administration"
            title="Profiles"
            description="Security profiles and the modules and menus each one grants."
        >
            <p class="empty-state">"No profiles to show."</p>
        </ScreenFrame>
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Administration"
            title="Users"
            description="Console users and their assigned security profile."
        >
            <p class="empty-state">"No users to show."</p>
        </ScreenFrame>
    }
}

#[component]
pub fn SecurityPolicyPage() -> impl IntoView {
    view! {
        <ScreenFrame
            section="Administration"
            title="Security Policy"
            description="Password rules and session limits applied to console users."
        >
            <p class="empty-state">"No policy configured."</p>
        </ScreenFrame>
    }
}
