use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::agenda::{agenda, AgendaDay};
use crate::builder::build_events;
use crate::classify::classify;
use crate::config::BoardConfig;
use crate::display;
use crate::lockers::expand_lockers;
use crate::models::{Event, Layout, LockerEntry, Sections};
use crate::parsing;

/// An event as the board paints it.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BoardItem {
    pub event: Event,
    pub lockers: Vec<LockerEntry>,
    pub sub_description: Option<String>,
    pub time_range: String,
}

impl BoardItem {
    pub fn new(event: &Event, config: &BoardConfig, tz: Tz) -> Self {
        Self {
            lockers: expand_lockers(event, config),
            sub_description: parsing::parse_event_description(&event.description),
            time_range: display::format_time_range(event.start, event.end, tz),
            event: event.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BoardView {
    pub layout: Layout,
    pub on_ice: Vec<BoardItem>,
    pub up_next: Option<BoardItem>,
    pub upcoming: Vec<BoardItem>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            layout: Layout::TwoSection,
            on_ice: Vec::new(),
            up_next: None,
            upcoming: Vec::new(),
        }
    }
}

impl BoardView {
    pub fn from_sections(sections: &Sections, config: &BoardConfig, tz: Tz) -> Self {
        let item = |event: &Event| BoardItem::new(event, config, tz);
        Self {
            layout: sections.layout(),
            on_ice: sections.on_ice.iter().map(item).collect(),
            up_next: sections.up_next.as_ref().map(item),
            upcoming: sections.upcoming.iter().map(item).collect(),
        }
    }
}

/// Everything one refresh cycle hands to the display. Each snapshot replaces
/// the previous one wholesale.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct BoardSnapshot {
    pub view: BoardView,
    pub agenda: Vec<AgendaDay>,
    pub status: String,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Runs the pure half of a refresh: rows → events → sections → view.
pub fn snapshot_from_rows(
    rows: &[Vec<String>],
    now: DateTime<Utc>,
    config: &BoardConfig,
    tz: Tz,
) -> BoardSnapshot {
    let events = build_events(rows, tz, config.default_rink);
    let sections = classify(&events, now, tz);

    BoardSnapshot {
        view: BoardView::from_sections(&sections, config, tz),
        agenda: agenda(&events, now, tz, config.agenda_days),
        status: format!("Updated: {}", display::format_updated(now, tz)),
        refreshed_at: Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn view_carries_lockers_and_descriptions() {
        let rows = vec![
            row(&["Start", "End", "Event", "Custom Title", "Description"]),
            row(&[
                "2025-06-01T16:00:00Z",
                "2025-06-01T17:00:00Z",
                "Hawks vs Owls",
                "",
                "Description: \"Senior night\" Home: 2 Away: 4",
            ]),
            row(&["2025-06-01T18:00:00Z", "2025-06-01T19:00:00Z", "Public Skate"]),
        ];
        let snapshot = snapshot_from_rows(&rows, at(16, 30), &BoardConfig::default(), UTC);

        assert_eq!(snapshot.view.layout, Layout::ThreeSection);
        assert_eq!(snapshot.status, "Updated: 4:30:00 PM");
        let on_ice = &snapshot.view.on_ice[0];
        assert_eq!(on_ice.sub_description.as_deref(), Some("Senior night"));
        assert_eq!(
            on_ice.lockers,
            vec![
                LockerEntry::new("2", Some("Home".to_string())),
                LockerEntry::new("4", Some("Away".to_string())),
            ]
        );
        let up_next = snapshot.view.up_next.as_ref().expect("up next");
        assert_eq!(up_next.event.team, "Public Skate");
        assert!(up_next.lockers.is_empty());
        assert_eq!(snapshot.agenda.len(), 1);
    }

    #[test]
    fn empty_feed_gives_an_empty_two_section_board() {
        let snapshot = snapshot_from_rows(&[], at(12, 0), &BoardConfig::default(), UTC);
        assert_eq!(snapshot.view, BoardView::default());
        assert!(snapshot.agenda.is_empty());
        assert_eq!(snapshot.refreshed_at, Some(at(12, 0)));
    }

    #[test]
    fn unvalidated_agenda_window_does_not_panic() {
        let config: BoardConfig =
            serde_json::from_str(r#"{"agenda_days":100000000,"facility_timezone":"UTC"}"#)
                .expect("parse config");
        let rows = vec![row(&["2025-06-03T16:00:00Z", "2025-06-03T17:00:00Z", "Hawks"])];
        let snapshot = snapshot_from_rows(&rows, at(12, 0), &config, UTC);
        assert_eq!(snapshot.agenda.len(), 1);
    }
}
