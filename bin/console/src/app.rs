//! Main Leptos application component and routing.
//!
//! Only `/login` and the dashboard shell are declared as router routes. Every
//! screen below `/dashboard` goes through one catch-all route that looks the
//! location up in the session's [`RouteTable`](paydesk_navigation::RouteTable),
//! so modules added to the catalog become reachable without a rebuild.

use crate::components::Sidebar;
use crate::navigation::{ReloadNavigation, get_navigation};
use crate::pages::{
    CallCenterPage, ChargebacksPage, FraudTeamPage, HomePage, LoginPage, PlaceholderPage,
    ProfilesPage, RiskManagementPage, SecurityPolicyPage, SettingsPage, StepUpPage,
    TransactionsPage, UsersPage,
};
use crate::types::{NavigationView, UserInfo};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Outlet, ParentRoute, Redirect, Route, Router, Routes},
    hooks::use_location,
    path,
};
use paydesk_navigation::routes::LANDING_PATH;
use paydesk_navigation::{Screen, ScreenRef};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="paydesk"/>
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=|| view! { <Redirect path="/dashboard"/> }/>
                <Route path=path!("/login") view=LoginPage/>
                <ParentRoute path=path!("/dashboard") view=DashboardLayout>
                    <Route path=path!("") view=|| view! { <Redirect path=LANDING_PATH/> }/>
                    <Route path=path!("/*any") view=DashboardScreen/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}

/// Dashboard shell: loads the navigation, then renders sidebar, header and
/// the current screen.
#[component]
fn DashboardLayout() -> impl IntoView {
    let reload = ServerAction::<ReloadNavigation>::new();
    let navigation = Resource::new(move || reload.version().get(), |_| get_navigation());
    provide_context(reload);

    view! {
        <Suspense fallback=move || view! { <p class="loading">"Loading..."</p> }>
            {move || {
                navigation.get().map(|result| {
                    match result {
                        Ok(Some(nav)) => view! { <DashboardShell nav=nav/> }.into_any(),
                        Ok(None) => view! { <Redirect path="/login"/> }.into_any(),
                        Err(e) => view! {
                            <div class="error-page">
                                <p>"Failed to load navigation. Please try again."</p>
                                <p class="error-detail">{e.to_string()}</p>
                            </div>
                        }.into_any(),
                    }
                })
            }}
        </Suspense>
    }
}

#[component]
fn DashboardShell(nav: NavigationView) -> impl IntoView {
    provide_context(nav.clone());

    view! {
        <div class="dashboard">
            <Sidebar modules=nav.modules capabilities=nav.capabilities/>
            <div class="dashboard-main">
                <Header user=nav.user/>
                <main class="container">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}

/// Header component with the signed-in user.
#[component]
fn Header(user: UserInfo) -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-left">
                <a href=LANDING_PATH class="logo">"paydesk"</a>
            </div>
            <div class="header-right">
                <div class="user-menu">
                    <span class="user-name">{user.label}</span>
                    {user.profile_name.map(|name| view! { <span class="user-profile">{name}</span> })}
                    <div class="user-dropdown">
                        <a href="/dashboard/settings">"Settings"</a>
                        <a href="/auth/logout" rel="external">"Log out"</a>
                    </div>
                </div>
            </div>
        </header>
    }
}

/// Renders the screen registered for the current location.
#[component]
fn DashboardScreen() -> impl IntoView {
    let location = use_location();
    let nav = use_context::<NavigationView>();

    move || {
        let Some(nav) = nav.as_ref() else {
            return view! { <NotFound/> }.into_any();
        };
        let pathname = location.pathname.get();
        match nav.routes.find(&pathname) {
            Some(route) => view! {
                <Title text=format!("{} | paydesk", route.title)/>
                {screen_view(route.screen.clone())}
            }
            .into_any(),
            None => view! { <NotFound/> }.into_any(),
        }
    }
}

fn screen_view(screen: ScreenRef) -> AnyView {
    match screen {
        ScreenRef::Screen { screen } => match screen {
            Screen::Login => view! { <Redirect path="/login"/> }.into_any(),
            Screen::Home => view! { <HomePage/> }.into_any(),
            Screen::Settings => view! { <SettingsPage/> }.into_any(),
            Screen::Profiles => view! { <ProfilesPage/> }.into_any(),
            Screen::Users => view! { <UsersPage/> }.into_any(),
            Screen::SecurityPolicy => view! { <SecurityPolicyPage/> }.into_any(),
            Screen::RiskManagement => view! { <RiskManagementPage/> }.into_any(),
            Screen::StepUp => view! { <StepUpPage/> }.into_any(),
            Screen::FraudTeam => view! { <FraudTeamPage/> }.into_any(),
            Screen::CallCenter => view! { <CallCenterPage/> }.into_any(),
            Screen::Chargebacks => view! { <ChargebacksPage/> }.into_any(),
            Screen::Transactions => view! { <TransactionsPage/> }.into_any(),
        },
        ScreenRef::Redirect { to } => view! { <Redirect path=to/> }.into_any(),
        ScreenRef::Placeholder { title } => view! { <PlaceholderPage title=title/> }.into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <p>"This screen does not exist or is not assigned to your profile."</p>
            <a href=LANDING_PATH>"Back to home"</a>
        </div>
    }
}
