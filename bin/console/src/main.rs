#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::{
        Router,
        routing::{get, post},
    };
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use paydesk_catalog::HttpBackend;
    use paydesk_console::{
        app::App,
        auth::{self, AppState},
        config::ServerConfig,
    };
    use std::sync::Arc;
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(backend = %config.backend.base_url, "Loaded configuration");

    let retry = config.backend.retry_policy();
    let backend = HttpBackend::new(config.backend)
        .expect("failed to build backend client")
        .with_token_lifetime(chrono::Duration::minutes(config.session.duration_minutes));

    // Create application state
    let app_state = Arc::new(AppState::new(Arc::new(backend), config.session, retry));

    // Spawn periodic session cleanup task
    let cleanup_state = app_state.clone();
    let cleanup_interval_secs = cleanup_state.session_config.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(cleanup_interval_secs));
        loop {
            interval.tick().await;
            let count = cleanup_state.purge_expired();
            if count > 0 {
                tracing::debug!(expired_sessions = count, "Periodic session cleanup");
            }
        }
    });

    let conf = get_configuration(None).expect("failed to get leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    // Create combined state for Leptos routes
    let combined_state = CombinedState {
        leptos_options: leptos_options.clone(),
        app_state: app_state.clone(),
    };

    let app = Router::new()
        // Auth routes
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", get(auth::logout))
        .leptos_routes(&combined_state, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler::<CombinedState, _>(
            shell,
        ))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        // Server functions reach sessions and catalogs through this extension
        .layer(axum::Extension(app_state))
        .with_state(combined_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

/// Combined state for the application.
#[cfg(feature = "ssr")]
#[derive(Clone)]
struct CombinedState {
    leptos_options: leptos::prelude::LeptosOptions,
    app_state: std::sync::Arc<paydesk_console::auth::AppState>,
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<CombinedState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &CombinedState) -> Self {
        state.leptos_options.clone()
    }
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<CombinedState> for std::sync::Arc<paydesk_console::auth::AppState> {
    fn from_ref(state: &CombinedState) -> Self {
        state.app_state.clone()
    }
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use leptos::prelude::*;
    use leptos_meta::*;
    use paydesk_console::app::App;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/paydesk.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Hydration entry point lives in lib.rs
}
