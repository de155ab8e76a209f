// ── Date formatting ──
//
// Display helpers in the local time zone. Inputs may be timestamps or
// raw strings from the wire; blank or unparsable strings format to "".

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Anything that can be read as a local timestamp.
pub trait AsLocalDateTime {
    fn as_local(&self) -> Option<DateTime<Local>>;
}

impl<Tz: TimeZone> AsLocalDateTime for DateTime<Tz> {
    fn as_local(&self) -> Option<DateTime<Local>> {
        Some(self.with_timezone(&Local))
    }
}

impl<T: AsLocalDateTime> AsLocalDateTime for Option<T> {
    fn as_local(&self) -> Option<DateTime<Local>> {
        self.as_ref().and_then(AsLocalDateTime::as_local)
    }
}

impl AsLocalDateTime for str {
    fn as_local(&self) -> Option<DateTime<Local>> {
        let s = self.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local));
        }
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;
        Local.from_local_datetime(&naive).earliest()
    }
}

impl AsLocalDateTime for String {
    fn as_local(&self) -> Option<DateTime<Local>> {
        self.as_str().as_local()
    }
}

fn render<D: AsLocalDateTime + ?Sized>(date: &D, fmt: &str) -> String {
    date.as_local()
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_default()
}

/// `Jan 5, 2024`
pub fn format_date<D: AsLocalDateTime + ?Sized>(date: &D) -> String {
    render(date, "%b %-d, %Y")
}

/// `Jan 5, 2024, 03:04 PM`
pub fn format_date_time<D: AsLocalDateTime + ?Sized>(date: &D) -> String {
    render(date, "%b %-d, %Y, %I:%M %p")
}

/// `03:04 PM`
pub fn format_time<D: AsLocalDateTime + ?Sized>(date: &D) -> String {
    render(date, "%I:%M %p")
}

/// `January 5, 2024`
pub fn format_date_long<D: AsLocalDateTime + ?Sized>(date: &D) -> String {
    render(date, "%B %-d, %Y")
}

/// Time for today, "Yesterday", "N days ago" within a week, otherwise the
/// short date.
pub fn format_relative<D: AsLocalDateTime + ?Sized>(date: &D) -> String {
    format_relative_at(date, Local::now())
}

/// [`format_relative`] against an explicit "now". Future timestamps show
/// the short date.
pub fn format_relative_at<D: AsLocalDateTime + ?Sized>(date: &D, now: DateTime<Local>) -> String {
    let Some(dt) = date.as_local() else {
        return String::new();
    };
    let elapsed = now.signed_duration_since(dt);
    if elapsed < Duration::zero() {
        return format_date(&dt);
    }
    match elapsed.num_days() {
        0 => format_time(&dt),
        1 => "Yesterday".to_owned(),
        n @ 2..=6 => format!("{n} days ago"),
        _ => format_date(&dt),
    }
}

fn same_day(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.year() == b.year() && a.ordinal() == b.ordinal()
}

pub fn is_today<D: AsLocalDateTime + ?Sized>(date: &D) -> bool {
    date.as_local().is_some_and(|d| same_day(d, Local::now()))
}

pub fn is_yesterday<D: AsLocalDateTime + ?Sized>(date: &D) -> bool {
    let Some(yesterday) = Local::now().checked_sub_signed(Duration::days(1)) else {
        return false;
    };
    date.as_local().is_some_and(|d| same_day(d, yesterday))
}

/// Current instant in UTC, for stamping payloads.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}
