use super::posix_tz::Daylight;
use super::posix_tz::PosixTz;
use super::posix_tz::RuleDate;
use super::posix_tz::Transition;
use super::posix_tz::Zone;

use chrono::FixedOffset;
use chrono::Offset;
use chrono::Utc;

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::character::complete::digit1;
use nom::character::complete::one_of;
use nom::combinator::*;
use nom::error::FromExternalError;
use nom::error::ParseError;
use nom::sequence::delimited;
use nom::sequence::preceded;
use nom::sequence::tuple;
use nom::IResult;

use std::num::ParseIntError;

/// Transition time when a rule does not give one, 02:00:00 local time
pub(crate) const DEFAULT_TRANSITION_TIME: i32 = 2 * 3600;

/// Largest hour accepted for a UTC offset, chrono offsets must stay under one day
const MAX_OFFSET_HOURS: u32 = 23;

/// Largest hour accepted for a transition time
const MAX_TRANSITION_HOURS: u32 = 167;

pub(crate) fn number<'a, E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>>(
    input: &'a str,
) -> IResult<&'a str, u32, E> {
    map_res(digit1, |s: &str| s.parse())(input)
}

fn is_quoted_name_char(chr: char) -> bool {
    chr.is_ascii_alphanumeric() || chr == '+' || chr == '-'
}

/// A zone abbreviation, either three or more letters or `<...>` quoted.
pub(crate) fn name<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, String, E> {
    map(
        alt((
            delimited(
                char('<'),
                verify(take_while1(is_quoted_name_char), |s: &str| s.len() >= 3),
                char('>'),
            ),
            verify(take_while1(|c: char| c.is_ascii_alphabetic()), |s: &str| {
                s.len() >= 3
            }),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// `hh[:mm[:ss]]` as seconds
pub(crate) fn hms<'a, E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>>(
    max_hours: u32,
) -> impl FnMut(&'a str) -> IResult<&'a str, i32, E> {
    move |input| {
        let (input, hours) = verify(number, |h: &u32| *h <= max_hours)(input)?;
        let (input, rest) = opt(tuple((
            preceded(char(':'), verify(number, |m: &u32| *m < 60)),
            opt(preceded(char(':'), verify(number, |s: &u32| *s < 60))),
        )))(input)?;

        let (minutes, seconds) = match rest {
            Some((m, s)) => (m, s.unwrap_or(0)),
            None => (0, 0),
        };

        let total = hours * 3600 + minutes * 60 + seconds;

        Ok((input, total as i32))
    }
}

/// `[+-]hh[:mm[:ss]]` as seconds
pub(crate) fn signed<'a, E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>>(
    max_hours: u32,
) -> impl FnMut(&'a str) -> IResult<&'a str, i32, E> {
    move |input| {
        let (input, sign) = opt(one_of("+-"))(input)?;
        let (input, value) = hms(max_hours)(input)?;

        let value = if sign == Some('-') { -value } else { value };

        Ok((input, value))
    }
}

/// A POSIX offset, positive west of UTC, converted to a chrono offset.
pub(crate) fn offset<'a, E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>>(
    input: &'a str,
) -> IResult<&'a str, FixedOffset, E> {
    map_opt(signed(MAX_OFFSET_HOURS), |west: i32| {
        FixedOffset::east_opt(-west)
    })(input)
}

pub(crate) fn rule_date<
    'a,
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>,
>(
    input: &'a str,
) -> IResult<&'a str, RuleDate, E> {
    alt((
        map(
            preceded(char('J'), verify(number, |n: &u32| (1..=365).contains(n))),
            RuleDate::Julian,
        ),
        map(
            preceded(
                char('M'),
                tuple((
                    verify(number, |m: &u32| (1..=12).contains(m)),
                    preceded(char('.'), verify(number, |w: &u32| (1..=5).contains(w))),
                    preceded(char('.'), verify(number, |d: &u32| *d <= 6)),
                )),
            ),
            |(month, week, weekday)| RuleDate::MonthWeekDay {
                month,
                week,
                weekday,
            },
        ),
        map(verify(number, |n: &u32| *n <= 365), RuleDate::Ordinal),
    ))(input)
}

pub(crate) fn transition<
    'a,
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>,
>(
    input: &'a str,
) -> IResult<&'a str, Transition, E> {
    let (input, date) = rule_date(input)?;
    let (input, time) = opt(preceded(char('/'), signed(MAX_TRANSITION_HOURS)))(input)?;

    let time = time.unwrap_or(DEFAULT_TRANSITION_TIME);

    Ok((input, Transition { date, time }))
}

// US rules since 2007, used by libc when DST is named without dates
fn default_rules() -> (Transition, Transition) {
    let start = Transition {
        date: RuleDate::MonthWeekDay {
            month: 3,
            week: 2,
            weekday: 0,
        },
        time: DEFAULT_TRANSITION_TIME,
    };

    let end = Transition {
        date: RuleDate::MonthWeekDay {
            month: 11,
            week: 1,
            weekday: 0,
        },
        time: DEFAULT_TRANSITION_TIME,
    };

    (start, end)
}

pub(crate) fn posix_tz<'a, E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>>(
    input: &'a str,
) -> IResult<&'a str, PosixTz, E> {
    let (input, standard_name) = name(input)?;

    // a bare name such as "UTC" is Coordinated Universal Time
    if input.is_empty() {
        let standard = Zone {
            name: standard_name,
            utc_offset: Utc.fix(),
        };

        return Ok((
            input,
            PosixTz {
                standard,
                daylight: None,
            },
        ));
    }

    let (input, standard_offset) = offset(input)?;

    let standard = Zone {
        name: standard_name,
        utc_offset: standard_offset,
    };

    let (input, daylight) = opt(tuple((
        name,
        opt(offset),
        opt(tuple((
            preceded(char(','), transition),
            preceded(char(','), transition),
        ))),
    )))(input)?;

    let daylight = match daylight {
        None => None,
        Some((daylight_name, daylight_offset, rules)) => {
            let utc_offset = match daylight_offset {
                Some(o) => o,
                None => match FixedOffset::east_opt(standard.utc_offset.local_minus_utc() + 3600)
                {
                    Some(o) => o,
                    None => {
                        return Err(nom::Err::Failure(E::from_error_kind(
                            input,
                            nom::error::ErrorKind::Verify,
                        )))
                    }
                },
            };

            let (start, end) = rules.unwrap_or_else(default_rules);

            Some(Daylight {
                zone: Zone {
                    name: daylight_name,
                    utc_offset,
                },
                start,
                end,
            })
        }
    };

    Ok((input, PosixTz { standard, daylight }))
}
