//! Home page component.

use crate::types::NavigationView;
use leptos::prelude::*;

/// Landing page: a greeting and a shortcut card per accessible module.
#[component]
pub fn HomePage() -> impl IntoView {
    let Some(nav) = use_context::<NavigationView>() else {
        return view! { <p>"Loading..."</p> }.into_any();
    };

    let greeting = format!("Welcome, {}!", nav.user.label);
    let shortcuts = nav
        .modules
        .iter()
        .filter(|node| nav.capabilities.has_access(&node.code))
        .map(|node| {
            let target = node
                .submodules
                .first()
                .map_or_else(|| node.path.clone(), |menu| menu.path.clone());
            let summary = match node.submodules.len() {
                0 => String::new(),
                1 => "1 screen".to_string(),
                n => format!("{n} screens"),
            };
            view! {
                <a href=target class="shortcut-card">
                    <h2>{node.title.clone()}</h2>
                    <p>{summary}</p>
                </a>
            }
        })
        .collect_view();

    view! {
        <div class="home-page">
            <h1>{greeting}</h1>
            {if nav.modules.is_empty() {
                view! {
                    <p>"No modules are assigned to your profile. Contact an administrator."</p>
                }
                    .into_any()
            } else {
                view! { <div class="shortcut-grid">{shortcuts}</div> }.into_any()
            }}
        </div>
    }
    .into_any()
}
