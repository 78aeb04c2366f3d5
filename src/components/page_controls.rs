//! Pager for paginated lists: previous/next, position, and page size.
//!
//! Page numbers are zero-based in state and on the wire; the label is
//! one-based.

#[cfg(test)]
#[path = "page_controls_test.rs"]
mod page_controls_test;

use leptos::prelude::*;

use crate::state::hooks::PaginatedHandle;
use crate::state::paginated::PaginatedState;

pub const PAGE_SIZE_CHOICES: [u32; 3] = [10, 20, 50];

/// Human-readable position, e.g. `Page 2 of 5 (43 total)`.
pub fn page_label<T>(state: &PaginatedState<T>) -> String {
    if state.total_pages == 0 {
        return "No results".to_owned();
    }
    format!("Page {} of {} ({} total)", u64::from(state.current_page) + 1, state.total_pages, state.total_elements)
}

/// Size choices offered in the selector; a non-standard current size is
/// kept so the selector can display it.
pub fn page_size_choices(current: u32) -> Vec<u32> {
    let mut choices = PAGE_SIZE_CHOICES.to_vec();
    if !choices.contains(&current) {
        choices.push(current);
        choices.sort_unstable();
    }
    choices
}

#[component]
pub fn PageControls<T>(pager: PaginatedHandle<T>) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
{
    let state = pager.state();

    let on_size_change = move |ev: leptos::ev::Event| {
        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
            pager.change_page_size(size);
        }
    };

    view! {
        <nav class="page-controls" aria-label="Pagination">
            <button
                class="page-controls__prev"
                disabled=move || state.with(|s| s.loading || !s.has_previous_page())
                on:click=move |_| {
                    let page = state.with_untracked(|s| s.current_page);
                    pager.go_to_page(page.saturating_sub(1));
                }
            >
                "Previous"
            </button>
            <span class="page-controls__label">{move || state.with(page_label)}</span>
            <button
                class="page-controls__next"
                disabled=move || state.with(|s| s.loading || !s.has_next_page())
                on:click=move |_| {
                    let page = state.with_untracked(|s| s.current_page);
                    if let Some(next) = page.checked_add(1) {
                        pager.go_to_page(next);
                    }
                }
            >
                "Next"
            </button>
            <select
                class="page-controls__size"
                prop:value=move || state.with(|s| s.page_size.to_string())
                on:change=on_size_change
            >
                {move || {
                    page_size_choices(state.with(|s| s.page_size))
                        .into_iter()
                        .map(|size| view! { <option value=size.to_string()>{size}</option> })
                        .collect_view()
                }}
            </select>
        </nav>
    }
}
