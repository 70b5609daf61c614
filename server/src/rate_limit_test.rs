use super::*;

fn limiter(per_user: usize, global: usize) -> RateLimiter {
    RateLimiter::with_config(RateLimitConfig {
        per_user_limit: per_user,
        global_limit: global,
        window: Duration::from_secs(10),
    })
}

#[test]
fn defaults_match_documented_limits() {
    let cfg = RateLimitConfig::default();
    assert_eq!(cfg.per_user_limit, 10);
    assert_eq!(cfg.global_limit, 100);
    assert_eq!(cfg.window, Duration::from_secs(10));
}

#[test]
fn per_user_allows_up_to_limit() {
    let rl = limiter(3, 100);
    let user = Uuid::new_v4();
    let now = Instant::now();

    for i in 0..3 {
        assert!(rl.check_and_record_at(user, now).is_ok(), "request {i} should succeed");
    }
    assert_eq!(
        rl.check_and_record_at(user, now),
        Err(RateLimitError::PerUserExceeded { limit: 3, window_secs: 10 })
    );
}

#[test]
fn global_allows_up_to_limit() {
    let rl = limiter(10, 4);
    let now = Instant::now();

    // Distinct users so the per-user limit is never hit first.
    for i in 0..4 {
        assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at(Uuid::new_v4(), now),
        Err(RateLimitError::GlobalExceeded { limit: 4, .. })
    ));
}

#[test]
fn window_expiry_allows_new_requests() {
    let rl = limiter(2, 100);
    let user = Uuid::new_v4();
    let start = Instant::now();

    rl.check_and_record_at(user, start).unwrap();
    rl.check_and_record_at(user, start).unwrap();
    assert!(rl.check_and_record_at(user, start).is_err());

    let after_window = start + Duration::from_secs(10) + Duration::from_millis(1);
    assert!(rl.check_and_record_at(user, after_window).is_ok());
}

#[test]
fn rejected_requests_are_not_recorded() {
    let rl = limiter(1, 100);
    let user = Uuid::new_v4();
    let start = Instant::now();

    rl.check_and_record_at(user, start).unwrap();
    for s in 1..=5 {
        assert!(rl.check_and_record_at(user, start + Duration::from_secs(s)).is_err());
    }
    // Only the first request counts toward the window.
    assert!(rl.check_and_record_at(user, start + Duration::from_millis(10_001)).is_ok());
}

#[test]
fn distinct_users_do_not_interfere() {
    let rl = limiter(1, 100);
    let now = Instant::now();
    let a = Uuid::new_v4();

    rl.check_and_record_at(a, now).unwrap();
    assert!(rl.check_and_record_at(a, now).is_err());
    assert!(rl.check_and_record_at(Uuid::new_v4(), now).is_ok());
}

#[test]
fn error_message_names_limit() {
    let err = RateLimitError::PerUserExceeded { limit: 10, window_secs: 10 };
    assert_eq!(err.to_string(), "per-user rate limit exceeded (max 10 requests/10s)");
}
