use super::*;
use crate::net::query::SortDir;
use crate::state::test_support::Gate;
use std::cell::RefCell;

fn page_of(items: &[&str], number: u32, size: u32, total_pages: u32, total_elements: u64) -> PageEnvelope<String> {
    PageEnvelope {
        content: items.iter().map(|s| (*s).to_owned()).collect(),
        total_elements,
        total_pages,
        size,
        number,
        first: number == 0,
        last: number + 1 >= total_pages,
        number_of_elements: u32::try_from(items.len()).unwrap(),
        empty: items.is_empty(),
    }
}

fn controller(gate: &Gate<ListParams, PageEnvelope<String>>, initial: ListParams) -> PaginatedController<String> {
    PaginatedController::new(gate.producer(), initial, FetchOptions::default())
}

#[test]
fn state_from_params_uses_defaults() {
    let state = PaginatedState::<String>::from_params(ListParams::new());
    assert_eq!(state.current_page, 0);
    assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
    assert!(state.data.is_empty());
    assert!(!state.has_next_page());
    assert!(!state.has_previous_page());
}

#[test]
fn page_navigation_helpers_follow_totals() {
    let mut state = PaginatedState::<String>::default();
    state.total_pages = 3;
    state.current_page = 1;
    assert!(state.has_next_page());
    assert!(state.has_previous_page());
    state.current_page = 2;
    assert!(!state.has_next_page());
}

#[tokio::test]
async fn initial_fetch_replaces_state_from_envelope() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10).with("type", "LIVE"));

    let initial = ctl.mount().unwrap();
    assert!(ctl.state().snapshot().loading);
    gate.settle(0, Ok(page_of(&["a", "b"], 0, 10, 3, 23)));
    initial.await;

    let state = ctl.state().snapshot();
    assert!(!state.loading);
    assert_eq!(state.data, vec!["a".to_owned(), "b".to_owned()]);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.total_elements, 23);
    assert_eq!(state.current_page, 0);
    assert_eq!(state.page_size, 10);
}

#[tokio::test]
async fn go_to_page_merges_filters_and_takes_number_from_envelope() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10).with("type", "LIVE"));

    let initial = ctl.refetch();
    gate.settle(0, Ok(page_of(&["a"], 0, 10, 3, 23)));
    initial.await;

    let next = ctl.go_to_page(2);
    let sent = gate.params(1);
    assert_eq!(sent.page(), Some(2));
    assert_eq!(sent.size(), Some(10));
    assert_eq!(sent.get("type"), Some(&serde_json::Value::from("LIVE")));

    gate.settle(1, Ok(page_of(&["x", "y", "z"], 2, 10, 3, 23)));
    next.await;

    let state = ctl.state().snapshot();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.params.page(), Some(2));
    assert_eq!(state.data.len(), 3);
}

#[tokio::test]
async fn envelope_overrides_clamped_page() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    let fut = ctl.go_to_page(99);
    gate.settle(0, Ok(page_of(&["last"], 4, 10, 5, 41)));
    fut.await;

    let state = ctl.state().snapshot();
    assert_eq!(state.current_page, 4);
    assert_eq!(state.params.page(), Some(99));
}

#[tokio::test]
async fn change_page_size_always_requests_first_page() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    let a = ctl.go_to_page(3);
    gate.settle(0, Ok(page_of(&["d"], 3, 10, 5, 50)));
    a.await;

    let b = ctl.change_page_size(25);
    let sent = gate.params(1);
    assert_eq!(sent.page(), Some(0));
    assert_eq!(sent.size(), Some(25));

    gate.settle(1, Ok(page_of(&["a"], 0, 25, 2, 50)));
    b.await;
    let state = ctl.state().snapshot();
    assert_eq!(state.current_page, 0);
    assert_eq!(state.page_size, 25);
    assert_eq!(state.params.page(), Some(0));
}

#[tokio::test]
async fn update_params_keeps_existing_keys() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10).with_sort("title", SortDir::Asc));

    let fut = ctl.update_params(ListParams::new().with_search("arabic"));
    let sent = gate.params(0);
    assert_eq!(sent.search(), Some("arabic"));
    assert_eq!(sent.get("sortBy"), Some(&serde_json::Value::from("title")));
    assert_eq!(sent.page(), Some(0));

    gate.settle(0, Ok(page_of(&[], 0, 10, 0, 0)));
    fut.await;
    assert_eq!(ctl.state().snapshot().params.search(), Some("arabic"));
}

#[tokio::test]
async fn consecutive_updates_use_latest_merged_params() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    let _first = ctl.update_params(ListParams::new().with("userId", "u1"));
    let _second = ctl.go_to_page(1);

    let sent = gate.params(1);
    assert_eq!(sent.get("userId"), Some(&serde_json::Value::from("u1")));
    assert_eq!(sent.page(), Some(1));
}

#[tokio::test]
async fn failure_keeps_previous_page_and_sets_error() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    let a = ctl.refetch();
    gate.settle(0, Ok(page_of(&["a", "b"], 0, 10, 1, 2)));
    a.await;

    let b = ctl.refetch();
    gate.settle(1, Err(ApiError::Transport("Failed to fetch".to_owned())));
    b.await;

    let state = ctl.state().snapshot();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch"));
    assert_eq!(state.data.len(), 2);
    assert!(!state.loading);
}

#[tokio::test]
async fn stale_page_response_is_ignored() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    let slow = ctl.go_to_page(1);
    let fast = ctl.go_to_page(2);
    gate.settle(1, Ok(page_of(&["p2"], 2, 10, 3, 30)));
    fast.await;
    gate.settle(0, Ok(page_of(&["p1"], 1, 10, 3, 30)));
    slow.await;

    let state = ctl.state().snapshot();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.data, vec!["p2".to_owned()]);
}

#[tokio::test]
async fn deferred_controller_does_not_fetch_on_mount() {
    let gate: Gate<ListParams, PageEnvelope<String>> = Gate::new();
    let ctl = PaginatedController::new(gate.producer(), ListParams::new(), FetchOptions::deferred());
    assert!(ctl.mount().is_none());
    assert_eq!(gate.call_count(), 0);
}

#[tokio::test]
async fn on_success_sees_applied_page() {
    let gate = Gate::new();
    let cell = LocalCell::new(PaginatedState::<String>::from_params(ListParams::paged(0, 10)));
    let seen = Rc::new(RefCell::new(None::<PaginatedState<String>>));
    let (view_cell, slot) = (cell.clone(), Rc::clone(&seen));
    let ctl = PaginatedController::with_cell(
        cell,
        gate.producer(),
        FetchOptions::default().on_success(move |_| *slot.borrow_mut() = Some(view_cell.snapshot())),
    );

    let fut = ctl.go_to_page(1);
    gate.settle(0, Ok(page_of(&["b"], 1, 10, 2, 11)));
    fut.await;

    let view = seen.borrow().clone().unwrap();
    assert!(!view.loading);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.data, vec!["b".to_owned()]);
}

#[tokio::test]
async fn largest_page_index_from_backend_is_safe() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    let fut = ctl.refetch();
    gate.settle(0, Ok(PageEnvelope { number: u32::MAX, total_pages: u32::MAX, ..PageEnvelope::empty(10) }));
    fut.await;

    let state = ctl.state().snapshot();
    assert_eq!(state.current_page, u32::MAX);
    assert!(!state.has_next_page());
    assert!(state.has_previous_page());
}

#[tokio::test]
async fn disposed_controller_keeps_last_requested_params() {
    let gate = Gate::new();
    let ctl = controller(&gate, ListParams::paged(0, 10));

    ctl.dispose();
    ctl.go_to_page(3).await;

    assert_eq!(gate.call_count(), 0);
    assert_eq!(ctl.state().snapshot().params.page(), Some(0));
}
