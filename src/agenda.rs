use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::classify::{classify, facility_date};
use crate::display;
use crate::lockers;
use crate::models::{Event, SectionKind};
use crate::parsing;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AgendaGame {
    pub title: String,
    pub rooms: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AgendaEntry {
    pub event: Event,
    pub time_range: String,
    /// Board section for events happening today, if any.
    pub section: Option<SectionKind>,
    pub games: Vec<AgendaGame>,
    pub sub_description: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub heading: String,
    pub entries: Vec<AgendaEntry>,
}

/// Printable schedule for events starting within the next `days` days,
/// grouped by facility-local date.
pub fn agenda(events: &[Event], now: DateTime<Utc>, tz: Tz, days: i64) -> Vec<AgendaDay> {
    let horizon = Duration::try_days(days.max(0))
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let sections = classify(events, now, tz);

    let mut window = events
        .iter()
        .filter(|event| event.start >= now && event.start <= horizon)
        .collect::<Vec<_>>();
    window.sort_by_key(|event| event.start);

    let mut out: Vec<AgendaDay> = Vec::new();
    for event in window {
        let date = facility_date(event.start, tz);
        let entry = AgendaEntry {
            event: event.clone(),
            time_range: display::format_time_range(event.start, event.end, tz),
            section: sections.section_of(&event.id),
            games: games_for(event),
            sub_description: parsing::parse_event_description(&event.description),
        };
        match out.last_mut() {
            Some(day) if day.date == date => day.entries.push(entry),
            _ => out.push(AgendaDay {
                date,
                heading: display::format_day_heading(date),
                entries: vec![entry],
            }),
        }
    }
    out
}

/// Splits an `A && B` booking into its games, each with its own rooms text.
pub fn games_for(event: &Event) -> Vec<AgendaGame> {
    let games = event.games();
    if games.len() <= 1 {
        return vec![AgendaGame {
            title: event.display_title().to_string(),
            rooms: event.locker.as_str().to_string(),
        }];
    }

    let segments = lockers::locker_segments(event);
    games
        .into_iter()
        .enumerate()
        .map(|(idx, title)| AgendaGame {
            rooms: lockers::game_rooms(&segments, idx, event),
            title,
        })
        .collect()
}
