//! Login page component.

use crate::error::LoginError;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Username and password sign-in.
///
/// The form posts straight to `/auth/login`; a failed attempt comes back
/// here with `?error=<reason>`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let error = move || {
        query.with(|params| {
            params
                .get("error")
                .map(|reason| LoginError::message_for(&reason))
        })
    };

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Sign in to paydesk"</h1>
                {move || error().map(|message| view! { <p class="login-error">{message}</p> })}
                <form method="post" action="/auth/login" class="login-form">
                    <label for="username">"Username"</label>
                    <input id="username" name="username" type="text" autocomplete="username" required/>
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        name="password"
                        type="password"
                        autocomplete="current-password"
                        required
                    />
                    <button type="submit" class="login-button">"Sign in"</button>
                </form>
            </div>
        </div>
    }
}
