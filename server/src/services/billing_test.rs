use super::*;

const SECRET: &str = "whsec_test_secret";
const NOW: i64 = 1_750_000_000;

fn sign(timestamp: i64, payload: &[u8], secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac init");
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

// =============================================================================
// verify_signature
// =============================================================================

#[test]
fn signature_accepts_matching_v1() {
    let payload = br#"{"type":"invoice.payment_succeeded"}"#;
    let header = format!("t={NOW},v1={}", sign(NOW, payload, SECRET));
    assert!(verify_signature(&header, payload, SECRET, NOW).is_ok());
}

#[test]
fn signature_accepts_any_of_several_v1_entries() {
    let payload = b"{}";
    let header = format!("t={NOW},v1=deadbeef,v0=abc,v1={}", sign(NOW, payload, SECRET));
    assert!(verify_signature(&header, payload, SECRET, NOW + 10).is_ok());
}

#[test]
fn signature_rejects_tampered_body() {
    let header = format!("t={NOW},v1={}", sign(NOW, b"{\"a\":1}", SECRET));
    assert!(matches!(
        verify_signature(&header, b"{\"a\":2}", SECRET, NOW),
        Err(BillingError::InvalidSignature)
    ));
}

#[test]
fn signature_rejects_wrong_secret() {
    let payload = b"{}";
    let header = format!("t={NOW},v1={}", sign(NOW, payload, "whsec_other"));
    assert!(verify_signature(&header, payload, SECRET, NOW).is_err());
}

#[test]
fn signature_rejects_stale_timestamp() {
    let payload = b"{}";
    let header = format!("t={NOW},v1={}", sign(NOW, payload, SECRET));
    assert!(verify_signature(&header, payload, SECRET, NOW + SIGNATURE_TOLERANCE_SECS).is_ok());
    assert!(verify_signature(&header, payload, SECRET, NOW + SIGNATURE_TOLERANCE_SECS + 1).is_err());
}

#[test]
fn signature_rejects_extreme_timestamps_without_overflow() {
    for issued in [i64::MIN, i64::MAX, -1] {
        let header = format!("t={issued},v1=00");
        assert!(
            matches!(verify_signature(&header, b"{}", SECRET, NOW), Err(BillingError::InvalidSignature)),
            "accepted t={issued}"
        );
    }
}

#[test]
fn signature_rejects_validly_signed_extreme_timestamp() {
    let payload = b"{}";
    let header = format!("t={},v1={}", i64::MIN, sign(i64::MIN, payload, SECRET));
    assert!(verify_signature(&header, payload, SECRET, NOW).is_err());
}

#[test]
fn signature_rejects_malformed_headers() {
    for header in ["", "v1=abc", "t=notanumber,v1=abc", "garbage"] {
        assert!(verify_signature(header, b"{}", SECRET, NOW).is_err(), "accepted {header:?}");
    }
}

// =============================================================================
// parse_event
// =============================================================================

#[test]
fn parse_checkout_completed_reads_metadata_user() {
    let payload = serde_json::json!({
        "type": "checkout.session.completed",
        "data": { "object": {
            "subscription": "sub_123",
            "customer": "cus_9",
            "metadata": { "userId": "8a1f0c7e-0000-4000-8000-000000000001" }
        }}
    });
    let event = parse_event(payload.to_string().as_bytes()).unwrap();
    assert_eq!(
        event,
        WebhookEvent::CheckoutCompleted {
            subscription_id: Some("sub_123".into()),
            user_id: Some("8a1f0c7e-0000-4000-8000-000000000001".into()),
        }
    );
}

#[test]
fn parse_invoice_reads_subscription_from_parent_details() {
    let payload = serde_json::json!({
        "type": "invoice.payment_succeeded",
        "data": { "object": {
            "subscription": null,
            "parent": { "subscription_details": { "subscription": "sub_new" } }
        }}
    });
    let event = parse_event(payload.to_string().as_bytes()).unwrap();
    assert_eq!(event, WebhookEvent::InvoicePaid { subscription_id: Some("sub_new".into()) });
}

#[test]
fn parse_other_event_is_ignored() {
    let payload = br#"{"type":"customer.created","data":{"object":{}}}"#;
    assert_eq!(parse_event(payload).unwrap(), WebhookEvent::Ignored("customer.created".into()));
}

#[test]
fn parse_event_without_type_errors() {
    assert!(matches!(parse_event(b"{}"), Err(BillingError::Parse(_))));
    assert!(matches!(parse_event(b"not json"), Err(BillingError::Parse(_))));
}

// =============================================================================
// Stripe responses
// =============================================================================

#[test]
fn parse_subscription_classic_shape() {
    let body = serde_json::json!({
        "id": "sub_1",
        "customer": "cus_1",
        "current_period_end": 1_760_000_000,
        "items": { "data": [ { "price": { "id": "price_1" } } ] }
    })
    .to_string();
    let update = parse_subscription(&body).unwrap();
    assert_eq!(
        update,
        SubscriptionUpdate {
            subscription_id: "sub_1".into(),
            customer_id: Some("cus_1".into()),
            price_id: Some("price_1".into()),
            current_period_end: Some(1_760_000_000),
        }
    );
}

#[test]
fn parse_subscription_period_on_item_and_expanded_customer() {
    let body = serde_json::json!({
        "id": "sub_2",
        "customer": { "id": "cus_2", "object": "customer" },
        "items": { "data": [ { "price": { "id": "price_2" }, "current_period_end": 1_770_000_000 } ] }
    })
    .to_string();
    let update = parse_subscription(&body).unwrap();
    assert_eq!(update.customer_id.as_deref(), Some("cus_2"));
    assert_eq!(update.current_period_end, Some(1_770_000_000));
}

#[test]
fn parse_session_url_requires_url() {
    assert_eq!(parse_session_url(r#"{"url":"https://checkout.stripe.com/c/pay/cs_1"}"#).unwrap(), "https://checkout.stripe.com/c/pay/cs_1");
    assert!(parse_session_url(r#"{"id":"cs_1"}"#).is_err());
}

// =============================================================================
// Request bodies
// =============================================================================

#[test]
fn checkout_form_describes_monthly_inr_plan() {
    let user_id = Uuid::nil();
    let form = checkout_form("https://app.example.com/settings", user_id);
    let get = |key: &str| form.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());

    assert_eq!(get("mode"), Some("subscription"));
    assert_eq!(get("success_url"), Some("https://app.example.com/settings"));
    assert_eq!(get("cancel_url"), Some("https://app.example.com/settings"));
    assert_eq!(get("line_items[0][price_data][currency]"), Some("inr"));
    assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("4999"));
    assert_eq!(get("line_items[0][price_data][recurring][interval]"), Some("month"));
    assert_eq!(get("line_items[0][price_data][product_data][name]"), Some("Companion Pro"));
    assert_eq!(get("line_items[0][quantity]"), Some("1"));
    assert_eq!(get("metadata[userId]"), Some("00000000-0000-0000-0000-000000000000"));
}

#[test]
fn portal_form_returns_to_settings() {
    let form = portal_form("https://app.example.com/settings", "cus_1");
    assert_eq!(
        form,
        vec![("customer", "cus_1".to_owned()), ("return_url", "https://app.example.com/settings".to_owned())]
    );
}

#[test]
fn missing_user_id_message_matches_response_body() {
    assert_eq!(BillingError::MissingUserId.to_string(), "User id is required");
}
