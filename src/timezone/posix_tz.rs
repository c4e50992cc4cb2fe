use super::parser;
use super::TimezoneError;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Duration;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::Utc;

use nom::combinator::all_consuming;
use nom::error::VerboseError;

use std::str::FromStr;

/// Days from 0001-01-01 (day 1) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

const SECONDS_PER_DAY: i64 = 86_400;

/// A timezone described by a POSIX `TZ` rule such as `CET-1CEST,M3.5.0,M10.5.0/3`.
///
/// The rule gives a standard zone and optionally a daylight saving zone with the dates it starts
/// and ends each year.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PosixTz {
    pub standard: Zone,
    pub daylight: Option<Daylight>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Zone {
    /// Abbreviation, for example `CET`
    pub name: String,
    pub utc_offset: FixedOffset,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Daylight {
    pub zone: Zone,
    /// Start of daylight saving time, in standard local time
    pub start: Transition,
    /// End of daylight saving time, in daylight local time
    pub end: Transition,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    pub date: RuleDate,
    /// Seconds after local midnight, may be negative or beyond one day
    pub time: i32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleDate {
    /// `Jn`: day 1 through 365, February 29 is never counted
    Julian(u32),
    /// `n`: zero-based day 0 through 365, February 29 is counted
    Ordinal(u32),
    /// `Mm.w.d`: weekday `d` (0 is Sunday) of week `w` (5 is the last) of month `m`
    MonthWeekDay { month: u32, week: u32, weekday: u32 },
}

impl RuleDate {
    /// The date this rule falls on in `year`.
    ///
    /// Returns `None` for `Ordinal(365)` outside a leap year.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            RuleDate::Julian(day) => {
                let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
                let ordinal = if leap && day >= 60 { day + 1 } else { day };

                NaiveDate::from_yo_opt(year, ordinal)
            }
            RuleDate::Ordinal(day) => NaiveDate::from_yo_opt(year, day + 1),
            RuleDate::MonthWeekDay {
                month,
                week,
                weekday,
            } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let first_weekday = first.weekday().num_days_from_sunday();

                let mut day = 1 + (weekday + 7 - first_weekday) % 7 + (week - 1) * 7;

                // week 5 means the last one in the month
                while day > 28 && NaiveDate::from_ymd_opt(year, month, day).is_none() {
                    day -= 7;
                }

                NaiveDate::from_ymd_opt(year, month, day)
            }
        }
    }
}

impl Transition {
    /// Seconds since the Unix epoch at which this transition happens in `year` for a clock
    /// running at `offset`.
    fn timestamp(&self, year: i32, offset: &FixedOffset) -> Option<i64> {
        let date = self.date.in_year(year)?;
        let days = i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE;

        let local = days * SECONDS_PER_DAY + i64::from(self.time);

        Some(local - i64::from(offset.local_minus_utc()))
    }
}

impl PosixTz {
    pub fn parse(input: &str) -> Result<PosixTz, TimezoneError> {
        if input.is_empty() {
            return Err(TimezoneError::Empty);
        }

        match all_consuming(parser::posix_tz::<VerboseError<&str>>)(input) {
            Ok((_, tz)) => Ok(tz),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let rest = e.errors.first().map(|(r, _)| *r).unwrap_or(input);

                Err(TimezoneError::Syntax {
                    position: input.len() - rest.len(),
                    found: rest.to_string(),
                })
            }
            Err(nom::Err::Incomplete(_)) => Err(TimezoneError::Syntax {
                position: input.len(),
                found: String::new(),
            }),
        }
    }

    /// Whether daylight saving time is in effect at `utc`.
    pub fn is_dst_at(&self, utc: DateTime<Utc>) -> bool {
        let daylight = match &self.daylight {
            Some(d) => d,
            None => return false,
        };

        let standard_offset = Duration::seconds(self.standard.utc_offset.local_minus_utc().into());

        // standard local time is outside chrono's range at the very ends of time
        let year = match utc.checked_add_signed(standard_offset) {
            Some(local) => local.year(),
            None => return false,
        };
        let now = utc.timestamp();

        let start = daylight.start.timestamp(year, &self.standard.utc_offset);
        let end = daylight.end.timestamp(year, &daylight.zone.utc_offset);

        match (start, end) {
            (Some(start), Some(end)) if start < end => start <= now && now < end,
            // southern hemisphere, daylight saving spans the new year
            (Some(start), Some(end)) => now >= start || now < end,
            _ => false,
        }
    }

    fn zone_at(&self, utc: DateTime<Utc>) -> &Zone {
        match &self.daylight {
            Some(d) if self.is_dst_at(utc) => &d.zone,
            _ => &self.standard,
        }
    }

    pub fn utc_offset_at(&self, utc: DateTime<Utc>) -> FixedOffset {
        self.zone_at(utc).utc_offset
    }

    pub fn abbreviation_at(&self, utc: DateTime<Utc>) -> &str {
        &self.zone_at(utc).name
    }

    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc.with_timezone(&self.utc_offset_at(utc))
    }
}

impl FromStr for PosixTz {
    type Err = TimezoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosixTz::parse(s)
    }
}
