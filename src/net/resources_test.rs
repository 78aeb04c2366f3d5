use super::*;
use crate::util::token_storage::MemoryTokenStore;
use std::rc::Rc;

fn client() -> ApiClient {
    ApiClient::new("http://localhost:8080/api", Rc::new(MemoryTokenStore::new()))
}

#[test]
fn resource_paths_format_ids() {
    assert_eq!(user_path("u1"), "/users/u1");
    assert_eq!(course_path("c9"), "/courses/c9");
}

#[test]
fn calendar_range_sets_both_bounds() {
    let params = calendar_range("2026-01-01", "2026-01-31");
    assert_eq!(
        params.query_pairs(),
        vec![
            ("endDate".to_owned(), "2026-01-31".to_owned()),
            ("startDate".to_owned(), "2026-01-01".to_owned()),
        ]
    );
}

#[test]
fn activity_filter_type_is_optional() {
    assert_eq!(activity_filter("u1", None).query_pairs(), vec![("userId".to_owned(), "u1".to_owned())]);
    let with_type = activity_filter("u1", Some("LOGIN"));
    assert_eq!(with_type.get("type"), Some(&serde_json::Value::from("LOGIN")));
}

#[test]
fn course_input_omits_unset_fields() {
    let input = CourseInput { title: "Tajweed I".to_owned(), published: true, ..CourseInput::default() };
    assert_eq!(
        serde_json::to_value(&input).unwrap(),
        serde_json::json!({ "title": "Tajweed I", "published": true })
    );
}

#[test]
fn calendar_event_reads_type_field() {
    let event: CalendarEvent = serde_json::from_value(serde_json::json!({
        "id": "e1",
        "title": "Halaqa",
        "startDate": "2026-03-01T18:00:00Z",
        "type": "LIVE_SESSION"
    }))
    .unwrap();
    assert_eq!(event.event_type.as_deref(), Some("LIVE_SESSION"));
    assert_eq!(event.end_date, None);
}

#[test]
fn payment_request_serializes_camel_case() {
    let req = PaymentRequest {
        course_id: "c1".to_owned(),
        amount: 49.5,
        currency: "USD".to_owned(),
        payment_method_id: "pm_123".to_owned(),
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["courseId"], "c1");
    assert_eq!(value["paymentMethodId"], "pm_123");
}

#[test]
fn user_decodes_with_defaults() {
    let user: User = serde_json::from_str(r#"{"id":"u1","email":"a@example.test","role":"ADMIN"}"#).unwrap();
    assert_eq!(user.role, Role::Admin);
    assert!(!user.enabled);
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn list_producer_surfaces_client_errors() {
    let produce = list_producer::<Course>(client(), COURSES_PATH);
    let err = produce(ListParams::paged(0, 10)).await.unwrap_err();
    assert_eq!(err, ApiError::Unavailable);
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn item_producer_can_be_called_repeatedly() {
    let produce = item_producer::<Course>(client(), course_path("c1"));
    assert!(produce().await.is_err());
    assert!(produce().await.is_err());
}
