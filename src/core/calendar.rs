use chrono::{Datelike, NaiveDate, Utc};

/// Places the month/day of `anniversary` onto `year`
///
/// A 29 February anniversary in a non-leap year rolls over to 1 March.
pub fn rebase_anniversary(anniversary: NaiveDate, year: i32) -> Option<NaiveDate> {
    anniversary
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// First day of the cap-year that contains `today`
///
/// The anniversary is rebased onto today's year; if today falls before that
/// date, the current cap-year began on last year's anniversary.
pub fn cap_year_start(anniversary: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = rebase_anniversary(anniversary, today.year());
    match this_year {
        Some(start) if today >= start => start,
        _ => rebase_anniversary(anniversary, today.year() - 1).unwrap_or(NaiveDate::MIN),
    }
}

/// The anniversary following a cap-year start
pub fn next_anniversary(anniversary: NaiveDate, cap_year_start: NaiveDate) -> NaiveDate {
    rebase_anniversary(anniversary, cap_year_start.year() + 1).unwrap_or(NaiveDate::MAX)
}

/// Today's calendar date in UTC, the default reference date for requests
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
