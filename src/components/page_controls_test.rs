use super::*;
use crate::net::query::ListParams;

fn state(current_page: u32, total_pages: u32, total_elements: u64) -> PaginatedState<String> {
    let mut state = PaginatedState::from_params(ListParams::paged(current_page, 10));
    state.total_pages = total_pages;
    state.total_elements = total_elements;
    state
}

#[test]
fn page_label_is_one_based() {
    assert_eq!(page_label(&state(1, 5, 43)), "Page 2 of 5 (43 total)");
}

#[test]
fn page_label_handles_empty_results() {
    assert_eq!(page_label(&state(0, 0, 0)), "No results");
}

#[test]
fn page_size_choices_keep_custom_size() {
    assert_eq!(page_size_choices(20), vec![10, 20, 50]);
    assert_eq!(page_size_choices(25), vec![10, 20, 25, 50]);
}

#[test]
fn page_label_handles_largest_page_index() {
    assert_eq!(
        page_label(&state(u32::MAX, u32::MAX, 1)),
        format!("Page {} of {} (1 total)", u64::from(u32::MAX) + 1, u32::MAX)
    );
}
