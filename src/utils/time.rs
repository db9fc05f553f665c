use chrono::{DateTime, Duration, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Publications older than this instant are due for archiving.
pub fn expiry_cutoff(now: DateTime<Utc>, max_age_days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(max_age_days))
}
