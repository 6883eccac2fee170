//! Generic screen for catalog entries without a dedicated page.

use leptos::prelude::*;

#[component]
pub fn PlaceholderPage(title: String) -> impl IntoView {
    view! {
        <div class="placeholder-page">
            <h1>{title}</h1>
            <p>"This screen is not available in the console yet."</p>
        </div>
    }
}
