use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

const TIME_FORMAT: &str = "%-I:%M %p";

/// `3:15 PM–4:05 PM` on the facility clock.
pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    format!(
        "{}–{}",
        start.with_timezone(&tz).format(TIME_FORMAT),
        end.with_timezone(&tz).format(TIME_FORMAT)
    )
}

/// Header clock, e.g. `Sun, Jun 1 4:30 PM`.
pub fn format_clock(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz)
        .format("%a, %b %-d %-I:%M %p")
        .to_string()
}

pub fn format_updated(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%-I:%M:%S %p").to_string()
}

/// Agenda day heading, e.g. `Sunday, June 1`.
pub fn format_day_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
