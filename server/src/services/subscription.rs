//! Subscription persistence and the "is pro" rule.
//!
//! A user is pro when they hold a stored Stripe price id and the current
//! period end, plus one day of grace, is still in the future. Rows are only
//! written by the Stripe webhook; reads happen on every auth lookup.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Grace period after `stripe_current_period_end` before access lapses.
pub const DAY_IN_MS: i64 = 86_400_000;

/// Stored subscription state for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRow {
    pub user_id: Uuid,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub stripe_price_id: Option<String>,
    /// Period end in epoch milliseconds.
    pub current_period_end_ms: Option<i64>,
}

impl SubscriptionRow {
    #[must_use]
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        is_active(self.stripe_price_id.as_deref(), self.current_period_end_ms, now_ms)
    }
}

/// Pro rule: a price id is present and `period_end + 1 day > now`.
#[must_use]
pub fn is_active(price_id: Option<&str>, period_end_ms: Option<i64>, now_ms: i64) -> bool {
    let has_price = price_id.is_some_and(|p| !p.is_empty());
    match period_end_ms {
        Some(end) if has_price => end.saturating_add(DAY_IN_MS) > now_ms,
        _ => false,
    }
}

/// Wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    let now = time::OffsetDateTime::now_utc();
    i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

/// Load the subscription row for `user_id`, if one exists.
pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<SubscriptionRow>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT user_id, stripe_customer_id, stripe_subscription_id, stripe_price_id,
                 (EXTRACT(EPOCH FROM stripe_current_period_end) * 1000)::BIGINT AS period_end_ms
          FROM user_subscriptions
          WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SubscriptionRow {
        user_id: r.get("user_id"),
        stripe_customer_id: r.get("stripe_customer_id"),
        stripe_subscription_id: r.get("stripe_subscription_id"),
        stripe_price_id: r.get("stripe_price_id"),
        current_period_end_ms: r.get("period_end_ms"),
    }))
}

/// Whether `user_id` currently holds an active pro subscription.
pub async fn is_pro(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = find_by_user(pool, user_id).await?;
    Ok(row.is_some_and(|r| r.is_active_at(now_ms())))
}

/// Fields copied from a Stripe subscription object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    pub subscription_id: String,
    pub customer_id: Option<String>,
    pub price_id: Option<String>,
    /// Period end in epoch seconds, as Stripe reports it.
    pub current_period_end: Option<i64>,
}

/// Record a completed checkout. One row per user; a repeat checkout replaces it.
pub async fn upsert_for_user(pool: &PgPool, user_id: Uuid, update: &SubscriptionUpdate) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"INSERT INTO user_subscriptions
              (user_id, stripe_customer_id, stripe_subscription_id, stripe_price_id, stripe_current_period_end)
          VALUES ($1, $2, $3, $4, to_timestamp($5))
          ON CONFLICT (user_id) DO UPDATE SET
              stripe_customer_id = EXCLUDED.stripe_customer_id,
              stripe_subscription_id = EXCLUDED.stripe_subscription_id,
              stripe_price_id = EXCLUDED.stripe_price_id,
              stripe_current_period_end = EXCLUDED.stripe_current_period_end",
    )
    .bind(user_id)
    .bind(&update.customer_id)
    .bind(&update.subscription_id)
    .bind(&update.price_id)
    .bind(update.current_period_end)
    .execute(pool)
    .await?;
    Ok(())
}

/// Refresh price and period end after a renewal. Returns whether a row matched.
pub async fn refresh_period(pool: &PgPool, update: &SubscriptionUpdate) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r"UPDATE user_subscriptions
          SET stripe_price_id = $2, stripe_current_period_end = to_timestamp($3)
          WHERE stripe_subscription_id = $1",
    )
    .bind(&update.subscription_id)
    .bind(&update.price_id)
    .bind(update.current_period_end)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;
