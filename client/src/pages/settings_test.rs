use super::*;

#[test]
fn plan_description_for_subscriber() {
    assert_eq!(plan_description(true), "You are currently on a Pro plan.");
}

#[test]
fn plan_description_for_free_user() {
    assert_eq!(plan_description(false), "You are currently on a free plan.");
}
