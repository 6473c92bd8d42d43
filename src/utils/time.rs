//! Epoch-millisecond clock used for every stored timestamp.

use chrono::Utc;

use crate::config::SECONDS_PER_HOUR;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn hours_to_millis(hours: i64) -> i64 {
    hours * SECONDS_PER_HOUR * 1000
}
