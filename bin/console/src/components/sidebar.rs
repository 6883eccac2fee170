//! Expandable sidebar built from the resolved module tree.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use paydesk_navigation::paths::normalize_location;
use paydesk_navigation::routes::LANDING_PATH;
use paydesk_navigation::{CapabilitySet, ResolvedModuleNode};

/// Sidebar navigation.
///
/// Module sections are shown only when the capability set grants the
/// module's code. The link matching the current location is highlighted and
/// the section containing it starts expanded.
#[component]
pub fn Sidebar(modules: Vec<ResolvedModuleNode>, capabilities: CapabilitySet) -> impl IntoView {
    let location = use_location();
    let current = Memo::new(move |_| normalize_location(&location.pathname.get()));

    let sections = modules
        .into_iter()
        .filter(|node| capabilities.has_access(&node.code))
        .map(|node| view! { <SidebarSection node=node current=current/> })
        .collect_view();

    view! {
        <nav class="sidebar">
            <ul class="sidebar-list">
                <SidebarLink path=LANDING_PATH.to_string() title="Home".to_string() current=current/>
                {sections}
                <SidebarLink
                    path="/dashboard/settings".to_string()
                    title="Settings".to_string()
                    current=current
                />
            </ul>
        </nav>
    }
}

#[component]
fn SidebarLink(path: String, title: String, current: Memo<String>) -> impl IntoView {
    let active = {
        let path = path.clone();
        move || current.get() == path
    };

    view! {
        <li class="sidebar-item" class:active=active>
            <a href=path>{title}</a>
        </li>
    }
}

/// One module: a plain link when it has no menus, otherwise a collapsible
/// group of menu links.
#[component]
fn SidebarSection(node: ResolvedModuleNode, current: Memo<String>) -> impl IntoView {
    if node.submodules.is_empty() {
        return view! { <SidebarLink path=node.path title=node.title current=current/> }
            .into_any();
    }

    // None until the user clicks the header; after that the click wins.
    let toggled = RwSignal::new(None::<bool>);
    let contains_current = {
        let node = node.clone();
        Memo::new(move |_| node.contains(&current.get()))
    };
    let open = move || section_open(toggled.get(), contains_current.get());

    let links = node
        .submodules
        .into_iter()
        .map(|menu| view! { <SidebarLink path=menu.path title=menu.title current=current/> })
        .collect_view();

    view! {
        <li class="sidebar-section" class:open=open>
            <button
                type="button"
                class="sidebar-toggle"
                on:click=move |_| toggled.set(Some(!open()))
            >
                {node.icon.map(|icon| view! { <span class="sidebar-icon">{icon}</span> })}
                <span class="sidebar-title">{node.title}</span>
            </button>
            <ul class="sidebar-children" class:collapsed=move || !open()>
                {links}
            </ul>
        </li>
    }
    .into_any()
}

fn section_open(toggled: Option<bool>, contains_current: bool) -> bool {
    toggled.unwrap_or(contains_current)
}
