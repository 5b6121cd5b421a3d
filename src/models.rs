use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Rendered in place of a locker when none could be extracted.
pub const NO_LOCKER: &str = "—";

/// Ice surface used when neither the description nor the titles name one.
pub const DEFAULT_RINK: char = 'C';

/// Locker tag accepted alongside numbered rooms.
pub const FLEX_LOCKER: &str = "FLEX";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LockerText {
    /// Comma-joined locker tokens, each optionally followed by a `(label)`.
    Assigned(String),
    Unassigned,
}

impl LockerText {
    pub fn as_str(&self) -> &str {
        match self {
            LockerText::Assigned(text) => text,
            LockerText::Unassigned => NO_LOCKER,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, LockerText::Assigned(_))
    }
}

impl From<Option<String>> for LockerText {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => LockerText::Assigned(text),
            _ => LockerText::Unassigned,
        }
    }
}

impl fmt::Display for LockerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LockerText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub id: String, // stable hash: start_utc|end_utc|title_raw
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub title_raw: String,
    pub team: String,
    pub description: String,
    pub locker: LockerText,
    pub raw_locker: String,
    pub rink: char,
    pub source_title: String,
    pub custom_title: String,
}

impl Event {
    /// Title shown on the board: the cleaned team name, or the raw title when
    /// cleaning left nothing behind.
    pub fn display_title(&self) -> &str {
        if self.team.is_empty() {
            &self.title_raw
        } else {
            &self.team
        }
    }

    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    /// Individual games of a combined `A && B` booking.
    pub fn games(&self) -> Vec<String> {
        self.display_title()
            .split("&&")
            .map(|game| game.trim().to_string())
            .collect()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LockerEntry {
    pub id: String,
    pub label: Option<String>,
}

impl LockerEntry {
    pub fn new(id: impl Into<String>, label: Option<String>) -> Self {
        Self {
            id: id.into(),
            label,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    ThreeSection,
    /// Nothing is on the ice; the board collapses to Up Next + Upcoming.
    TwoSection,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    OnIce,
    UpNext,
    Upcoming,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::OnIce => "In Progress",
            SectionKind::UpNext => "Up Next",
            SectionKind::Upcoming => "Upcoming",
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Sections {
    pub on_ice: Vec<Event>,
    pub up_next: Option<Event>,
    pub upcoming: Vec<Event>,
}

impl Sections {
    pub fn layout(&self) -> Layout {
        if self.on_ice.is_empty() {
            Layout::TwoSection
        } else {
            Layout::ThreeSection
        }
    }

    pub fn up_next_list(&self) -> &[Event] {
        self.up_next.as_slice()
    }

    pub fn section_of(&self, id: &str) -> Option<SectionKind> {
        if self.on_ice.iter().any(|event| event.id == id) {
            Some(SectionKind::OnIce)
        } else if self.up_next.as_ref().is_some_and(|event| event.id == id) {
            Some(SectionKind::UpNext)
        } else if self.upcoming.iter().any(|event| event.id == id) {
            Some(SectionKind::Upcoming)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.on_ice.len() + self.up_next_list().len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
