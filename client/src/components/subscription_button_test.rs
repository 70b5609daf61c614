use super::*;

#[test]
fn label_for_subscriber_manages_subscription() {
    assert_eq!(subscription_label(true), "Manage Subscription");
}

#[test]
fn label_for_free_user_upgrades() {
    assert_eq!(subscription_label(false), "Upgrade");
}
