//! Public landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page asks the admin origin whether the visitor already has a
//! session there. A confirmed session redirects to the admin dashboard; no
//! answer, a timeout, or a signed-out answer leave the visitor on the public
//! view. Published courses are listed from the backend either way.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::page_controls::PageControls;
use crate::config::AppConfig;
use crate::net::api::ApiClient;
use crate::net::auth_handshake::SessionProbe;
use crate::net::query::{DEFAULT_PAGE_SIZE, ListParams, SortDir};
use crate::net::resources::{COURSES_PATH, Course, list_producer};
use crate::state::fetch::FetchOptions;
use crate::state::hooks::use_paginated;
use crate::state::sequence::CancelHandle;
use crate::util::token_storage::{TokenStore, store_session};

/// First page of published courses, newest first.
pub fn course_list_params() -> ListParams {
    ListParams::paged(0, DEFAULT_PAGE_SIZE).with("published", true).with_sort("createdAt", SortDir::Desc)
}

/// Keep the admin origin's token locally so API calls from this site are
/// authenticated too. Returns whether a session was stored.
pub fn remember_session(probe: &SessionProbe, store: &dyn TokenStore) -> bool {
    let SessionProbe::Authenticated(result) = probe else {
        return false;
    };
    match (&result.token, &result.user) {
        (Some(token), Some(user)) => {
            store_session(store, token, None, user);
            true
        }
        _ => false,
    }
}

/// Redirect target once the handshake settles. Nothing happens if the page
/// was left while the handshake was running.
pub fn navigation_target(probe: &SessionProbe, config: &AppConfig, unmounted: &CancelHandle) -> Option<String> {
    if unmounted.is_cancelled() {
        return None;
    }
    probe.redirect_target(config)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let courses = use_paginated(
        list_producer::<Course>(ApiClient::browser(&config), COURSES_PATH),
        course_list_params(),
        FetchOptions::default(),
    );
    let state = courses.state();

    #[cfg(feature = "hydrate")]
    {
        let config = config.clone();
        let unmounted = CancelHandle::default();
        on_cleanup({
            let unmounted = unmounted.clone();
            move || unmounted.cancel()
        });
        leptos::task::spawn_local(async move {
            let probe = SessionProbe::from(crate::net::auth_handshake::check_admin_session(&config).await);
            if unmounted.is_cancelled() {
                return;
            }
            if let SessionProbe::Unknown(e) = &probe {
                leptos::logging::log!("home: admin session unknown ({e}); staying on public view");
            }
            remember_session(&probe, &crate::util::token_storage::BrowserTokenStore);
            if let Some(target) = navigation_target(&probe, &config, &unmounted) {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(&target);
                }
            }
        });
    }

    let sign_in_href = format!("{}/login", config.admin_base_url);

    view! {
        <main class="home-page">
            <section class="home-hero">
                <h1>"Halaqa Academy"</h1>
                <p class="home-hero__tagline">
                    "Qur'an, Arabic and Islamic studies with qualified teachers."
                </p>
                <a class="home-hero__cta" href=sign_in_href>
                    "Sign in"
                </a>
            </section>
            <section class="home-courses">
                <h2>"Courses"</h2>
                <ErrorBanner
                    error=Signal::derive(move || state.with(|s| s.error.clone()))
                    on_retry=Callback::new(move |()| courses.refetch())
                />
                <Show when=move || state.with(|s| s.loading)>
                    <p class="home-courses__loading">"Loading courses..."</p>
                </Show>
                <ul class="course-list">
                    <For
                        each=move || state.with(|s| s.data.clone())
                        key=|course| course.id.clone()
                        let:course
                    >
                        <li class="course-card">
                            <h3 class="course-card__title">{course.title.clone()}</h3>
                            <p class="course-card__description">
                                {course.description.clone().unwrap_or_default()}
                            </p>
                        </li>
                    </For>
                </ul>
                <PageControls pager=courses />
            </section>
        </main>
    }
}
