//! Timezone-aware clock lookup.

use crate::outcome::TextResult;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Current local time in an IANA timezone.
pub fn get_current_time_in_timezone(timezone: &str) -> TextResult {
    time_in_timezone(timezone, Utc::now())
}

/// Local time of `now` in an IANA timezone.
///
/// Names match exactly first, then ignoring case. The reply keeps the
/// caller's spelling.
pub fn time_in_timezone(timezone: &str, now: DateTime<Utc>) -> TextResult {
    match resolve_timezone(timezone) {
        Some(tz) => TextResult::Success(format!(
            "The current local time in {} is: {}",
            timezone,
            now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S")
        )),
        None => TextResult::Failure(format!(
            "Error: Unknown timezone '{}'. Please provide a valid timezone.",
            timezone
        )),
    }
}

fn resolve_timezone(name: &str) -> Option<Tz> {
    name.parse::<Tz>()
        .ok()
        .or_else(|| Tz::from_str_insensitive(name).ok())
}
