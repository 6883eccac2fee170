use leptos::prelude::*;

/// Common layout for dashboard screens: breadcrumb, title, and body.
#[component]
pub fn ScreenFrame(
    section: &'static str,
    title: &'static str,
    description: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="screen">
            <nav class="breadcrumb">
                <span>{section}</span>
                " / "
                <span>{title}</span>
            </nav>
            <h1>{title}</h1>
            <p class="screen-description">{description}</p>
            <div class="screen-body">{children()}</div>
        </div>
    }
}
