use super::*;

#[test]
fn companion_endpoint_formats_expected_path() {
    assert_eq!(companion_endpoint("c1"), "/api/companion/c1");
}

#[test]
fn chat_endpoint_formats_expected_path() {
    assert_eq!(chat_endpoint("c1"), "/api/chat/c1");
}

#[test]
fn list_endpoint_without_filters_has_no_query() {
    assert_eq!(companions_list_endpoint(&CompanionQuery::default()), "/api/companion");
}

#[test]
fn list_endpoint_carries_both_filters() {
    let query = CompanionQuery { category_id: Some("cat-1".into()), name: Some("ada".into()) };
    assert_eq!(companions_list_endpoint(&query), "/api/companion?categoryId=cat-1&name=ada");
}

#[test]
fn list_endpoint_drops_empty_filters() {
    let query = CompanionQuery { category_id: Some(String::new()), name: Some("ada".into()) };
    assert_eq!(companions_list_endpoint(&query), "/api/companion?name=ada");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message("companion delete", 404), "companion delete failed: 404");
}
