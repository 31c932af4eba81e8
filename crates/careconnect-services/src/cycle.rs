//! Billing cycle date math
//!
//! Cycles run twice a month: the 1st through the 14th, and the 15th through
//! month end. The due date for a cycle is its start plus the fixed
//! payment-terms offset.

use chrono::{DateTime, Datelike, Days, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::constants::{MID_MONTH_DAY, PAYMENT_TERMS_DAYS, SECONDS_PER_DAY};

/// Start of the billing cycle containing `now`
///
/// Returns the 1st of the month at midnight when the day is before the 15th,
/// otherwise the 15th at midnight.
pub fn current_cycle_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    let anchor = if date.day() < MID_MONTH_DAY {
        1
    } else {
        MID_MONTH_DAY
    };

    // walking back to the anchor day stays within the month, so this never
    // needs a fallible with_day
    let start = date - Days::new(u64::from(date.day() - anchor));
    start.and_time(NaiveTime::MIN).and_utc()
}

/// Due date for the cycle containing `now`: cycle start + payment terms
pub fn next_billing_date(now: DateTime<Utc>) -> DateTime<Utc> {
    current_cycle_start(now) + Duration::days(PAYMENT_TERMS_DAYS)
}

/// Pro-rated charge from `change_date` to `cycle_end`
///
/// Charges `daily_rate` for each started day remaining in the cycle; zero
/// when the change falls on or after the cycle end.
pub fn pro_rated_amount(
    daily_rate: Decimal,
    change_date: DateTime<Utc>,
    cycle_end: DateTime<Utc>,
) -> Decimal {
    let seconds = (cycle_end - change_date).num_seconds();
    if seconds <= 0 {
        return Decimal::ZERO;
    }

    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    daily_rate * Decimal::from(days)
}

/// Whole days elapsed since `due_date` (never negative)
pub fn days_overdue(due_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - due_date).num_days().max(0)
}
