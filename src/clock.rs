use crate::configuration::ValidNtpConfig;
use crate::timezone::PosixTz;

use chrono::DateTime;
use chrono::Datelike;
use chrono::FixedOffset;
use chrono::Timelike;
use chrono::Utc;

use tracing::trace;

/// Local years before this mean the clock has not been set by NTP yet.
pub const FIRST_VALID_YEAR: i32 = 2016;

/// The local wall-clock time for `now` in `tz`.
///
/// Returns `None` while the clock is unsynchronized.  A device without a battery backed clock
/// starts at the Unix epoch, so anything before [`FIRST_VALID_YEAR`] cannot be trusted.
pub fn local_time(tz: &PosixTz, now: DateTime<Utc>) -> Option<DateTime<FixedOffset>> {
    let local = tz.to_local(now);

    if local.year() < FIRST_VALID_YEAR {
        trace!("clock not synchronized, local time is {}", local);

        return None;
    }

    Some(local)
}

pub fn minutes_past_midnight(local: &DateTime<FixedOffset>) -> u32 {
    local.hour() * 60 + local.minute()
}

/// Whether `minutes` past local midnight falls between the offset sunrise and sunset.
///
/// `sunrise` and `sunset` are minutes past local midnight.  The period starts at sunrise plus
/// the sunrise offset and ends, exclusive, at sunset plus the sunset offset.  Without
/// sunrise/sunset handling it is always day.
pub fn is_day_period(minutes: u32, sunrise: u32, sunset: u32, config: &ValidNtpConfig) -> bool {
    if !config.sunset_enabled {
        return true;
    }

    let minutes = i64::from(minutes);
    let start = i64::from(sunrise) + config.sunrise_offset.num_minutes();
    let end = i64::from(sunset) + config.sunset_offset.num_minutes();

    let day = minutes >= start && minutes < end;

    trace!(
        "{} minutes past midnight, day from {} to {}: {}",
        minutes,
        start,
        end,
        day
    );

    day
}
