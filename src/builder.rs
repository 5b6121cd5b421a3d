use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::models::{Event, LockerText, NO_LOCKER};
use crate::parsing::{self, base};

static GVIZ_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^Date\(\s*(\d{4})\s*,\s*(\d{1,2})\s*,\s*(\d{1,2})(?:\s*,\s*(\d{1,2}))?(?:\s*,\s*(\d{1,2}))?(?:\s*,\s*(\d{1,2}))?\s*\)$",
    )
    .expect("valid gviz date regex")
});

const NAIVE_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M%p",
];

/// Offset-bearing shapes RFC 3339 rejects because the seconds are missing.
const MINUTE_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// One spreadsheet row, by column position. Missing trailing cells read as
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub start: String,
    pub end: String,
    pub source_title: String,
    pub custom_title: String,
    pub description: String,
    /// Sheet-side local time column; informational only.
    pub local_time: Option<String>,
}

impl SheetRow {
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();
        Self {
            start: cell(0),
            end: cell(1),
            source_title: cell(2),
            custom_title: cell(3),
            description: cell(4),
            local_time: cells.get(5).filter(|value| !value.trim().is_empty()).cloned(),
        }
    }

    /// Custom title wins over the calendar title when it has content.
    pub fn display_title(&self) -> Option<String> {
        [self.custom_title.trim(), self.source_title.trim()]
            .into_iter()
            .find(|title| !title.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    MissingField,
    BadInstant,
    InvertedRange,
}

/// True when the first cell of the sheet looks like a column header.
pub fn is_header(row: &[String]) -> bool {
    row.first()
        .is_some_and(|cell| cell.to_lowercase().contains("start"))
}

/// Maps decoded sheet rows to events, sorted by start time.
///
/// Rows with a missing start, end or title, an unparseable instant, or a
/// start that is not strictly before the end are skipped.
pub fn build_events(rows: &[Vec<String>], tz: Tz, default_rink: char) -> Vec<Event> {
    let body = match rows.first() {
        Some(first) if is_header(first) => &rows[1..],
        _ => rows,
    };

    let mut events = Vec::with_capacity(body.len());
    for (idx, cells) in body.iter().enumerate() {
        let row = SheetRow::from_cells(cells);
        match build_event(&row, tz, default_rink) {
            Ok(event) => events.push(event),
            Err(reason) => tracing::debug!(row = idx, ?reason, "skipping schedule row"),
        }
    }

    events.sort_by_key(|event| event.start);
    events
}

pub fn build_event(row: &SheetRow, tz: Tz, default_rink: char) -> Result<Event, RowRejection> {
    let title_raw = row.display_title().ok_or(RowRejection::MissingField)?;
    if row.start.trim().is_empty() || row.end.trim().is_empty() {
        return Err(RowRejection::MissingField);
    }

    let start = parse_instant(&row.start, tz).ok_or(RowRejection::BadInstant)?;
    let end = parse_instant(&row.end, tz).ok_or(RowRejection::BadInstant)?;
    if start >= end {
        return Err(RowRejection::InvertedRange);
    }

    let candidates = [
        row.description.as_str(),
        title_raw.as_str(),
        row.source_title.as_str(),
    ];
    let locker = LockerText::from(base::first_match(&candidates, parsing::extract_locker));
    let rink = base::first_match(&candidates, parsing::extract_rink).unwrap_or(default_rink);
    let raw_locker = candidates
        .iter()
        .find(|text| !text.is_empty())
        .map(|text| text.to_string())
        .unwrap_or_else(|| NO_LOCKER.to_string());

    Ok(Event {
        id: event_id(start, end, &title_raw),
        start,
        end,
        team: parsing::clean_team_name(&title_raw),
        title_raw,
        description: row.description.clone(),
        locker,
        raw_locker,
        rink,
        source_title: row.source_title.clone(),
        custom_title: row.custom_title.clone(),
    })
}

/// Parses a sheet timestamp. Offsets and `Z` are honoured; naive values and
/// gviz `Date(...)` literals are read as facility-local wall time.
pub fn parse_instant(text: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let cleaned = base::clean_text(text);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(dt) = parse_with_offset(&cleaned) {
        return Some(dt);
    }

    if let Some(naive) = parse_gviz_date(&cleaned) {
        return localize(naive, tz);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&cleaned, fmt).ok())
        .and_then(|naive| localize(naive, tz))
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = MINUTE_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    let zulu = text.strip_suffix(['Z', 'z'])?;
    NaiveDateTime::parse_from_str(zulu, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_gviz_date(text: &str) -> Option<NaiveDateTime> {
    let caps = GVIZ_DATE_RE.captures(text)?;
    let part = |idx: usize| -> Option<u32> {
        caps.get(idx)
            .map_or(Some(0), |m| m.as_str().parse::<u32>().ok())
    };

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    // gviz months are zero-based, like JavaScript's Date.
    let date = NaiveDate::from_ymd_opt(year, part(2)? + 1, part(3)?)?;
    let time = NaiveTime::from_hms_opt(part(4)?, part(5)?, part(6)?)?;
    Some(NaiveDateTime::new(date, time))
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

fn event_id(start: DateTime<Utc>, end: DateTime<Utc>, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(start.to_rfc3339().as_bytes());
    hasher.update(b"|");
    hasher.update(end.to_rfc3339().as_bytes());
    hasher.update(b"|");
    hasher.update(title.as_bytes());
    format!("{:x}", hasher.finalize())
}
