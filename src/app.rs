//! Root application component.
//!
//! SYSTEM CONTEXT
//! ==============
//! Resolves `AppConfig` once and provides it as context, then mounts the
//! router. Pages build their own API clients from the config because the
//! client holds browser-local storage handles that cannot live in shared
//! context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Route, Router, Routes};

use crate::config::AppConfig;
use crate::pages::home::HomePage;

/// Configuration for this build: runtime environment on the server, baked
/// build-time values in the browser, local defaults when either is invalid.
pub fn load_config() -> AppConfig {
    #[cfg(feature = "ssr")]
    let loaded = AppConfig::from_env();
    #[cfg(not(feature = "ssr"))]
    let loaded = AppConfig::from_build_env();

    loaded.unwrap_or_else(|e| {
        leptos::logging::warn!("config: {e}; falling back to local defaults");
        AppConfig::default()
    })
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(load_config());

    view! {
        <Title text="Halaqa Academy" />
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                <Route path=StaticSegment("") view=HomePage />
            </Routes>
        </Router>
    }
}
