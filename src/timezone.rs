use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

/// Look up a timezone by its canonical name, e.g. "Asia/Bangkok".
///
/// Returns `None` if the timezone name is not recognised.
pub fn get_timezone(canonical_timezone: &str) -> Option<&'static Tz> {
    time_tz::timezones::get_by_name(canonical_timezone)
}

/// Get the current UTC offset for a canonical timezone name, e.g. "Asia/Bangkok".
///
/// Returns `None` if the timezone name is not recognised.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    get_timezone(canonical_timezone).map(|tz| offset_at(tz, OffsetDateTime::now_utc()))
}

/// The UTC offset that `timezone` had at the instant `timestamp`.
///
/// Daylight saving means this can differ from the offset today.
pub fn offset_at(timezone: &Tz, timestamp: OffsetDateTime) -> UtcOffset {
    timezone.get_offset_utc(&timestamp).to_utc()
}
