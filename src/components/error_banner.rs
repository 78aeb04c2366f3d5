//! Inline error banner for failed data fetches.

use leptos::prelude::*;

/// Shows `error` when set, with an optional retry button.
#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <div class="error-banner" role="alert">
                <span class="error-banner__message">{move || error.get().unwrap_or_default()}</span>
                {on_retry
                    .map(|retry| {
                        view! {
                            <button class="error-banner__retry" on:click=move |_| retry.run(())>
                                "Retry"
                            </button>
                        }
                    })}
            </div>
        </Show>
    }
}
