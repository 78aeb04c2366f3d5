use super::*;

#[test]
fn paged_sets_page_and_size() {
    let params = ListParams::paged(0, 25);
    assert_eq!(params.page(), Some(0));
    assert_eq!(params.size(), Some(25));
}

#[test]
fn merge_overwrites_only_present_keys() {
    let mut params = ListParams::paged(1, 10).with_search("fiqh").with("type", "LIVE");
    params.merge(&ListParams::new().with_page(2));
    assert_eq!(params.page(), Some(2));
    assert_eq!(params.size(), Some(10));
    assert_eq!(params.search(), Some("fiqh"));
    assert_eq!(params.get("type"), Some(&Value::from("LIVE")));
}

#[test]
fn merged_leaves_original_untouched() {
    let base = ListParams::paged(3, 10);
    let next = base.merged(&ListParams::new().with_size(50).with_page(0));
    assert_eq!(base.page(), Some(3));
    assert_eq!(next.page(), Some(0));
    assert_eq!(next.size(), Some(50));
}

#[test]
fn page_accepts_numeric_strings() {
    let params = ListParams::new().with("page", "4");
    assert_eq!(params.page(), Some(4));
}

#[test]
fn page_rejects_negative_values() {
    let params = ListParams::new().with("page", -1);
    assert_eq!(params.page(), None);
}

#[test]
fn query_pairs_are_sorted_and_skip_nulls() {
    let params = ListParams::paged(0, 10)
        .with_sort("createdAt", SortDir::Desc)
        .with("userId", Value::Null)
        .with("active", true);
    assert_eq!(
        params.query_pairs(),
        vec![
            ("active".to_owned(), "true".to_owned()),
            ("page".to_owned(), "0".to_owned()),
            ("size".to_owned(), "10".to_owned()),
            ("sortBy".to_owned(), "createdAt".to_owned()),
            ("sortDir".to_owned(), "desc".to_owned()),
        ]
    );
}

#[test]
fn query_pairs_repeat_array_keys() {
    let params = ListParams::new().with("status", serde_json::json!(["PAID", "PENDING"]));
    assert_eq!(
        params.query_pairs(),
        vec![("status".to_owned(), "PAID".to_owned()), ("status".to_owned(), "PENDING".to_owned())]
    );
}

#[test]
fn list_params_serialize_as_plain_object() {
    let params = ListParams::paged(2, 5);
    assert_eq!(serde_json::to_value(&params).unwrap(), serde_json::json!({ "page": 2, "size": 5 }));
}
