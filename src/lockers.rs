use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::BoardConfig;
use crate::models::{Event, LockerEntry, NO_LOCKER};
use crate::parsing::{self, base};

static ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]+)(?:\s*\((.+)\))?$").expect("valid locker assignment regex")
});

/// Which lockers an event uses, each with the team that dresses there.
///
/// Labels are suppressed for session-style titles (public skate, lessons)
/// so a locker is never captioned with something that is not a team. When
/// the locker list yields nothing and the legacy fallback is enabled, `&&`
/// multi-game bookings are re-read game by game.
pub fn expand_lockers(event: &Event, config: &BoardConfig) -> Vec<LockerEntry> {
    if !event.locker.is_assigned() {
        return Vec::new();
    }

    let entries = parse_assignments(event, config);
    if !entries.is_empty() || !config.legacy_locker_fallback {
        return entries;
    }
    legacy_assignments(event, config)
}

fn parse_assignments(event: &Event, config: &BoardConfig) -> Vec<LockerEntry> {
    let generic = parsing::is_generic_title(event.display_title(), &config.generic_keywords);

    base::split_top_level(event.locker.as_str(), ',')
        .iter()
        .filter_map(|token| ASSIGNMENT_RE.captures(token))
        .filter_map(|caps| {
            let id = caps.get(1)?.as_str().to_uppercase();
            if !config.is_known_locker(&id) {
                return None;
            }
            let label = caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|label| !label.is_empty() && !generic);
            Some(LockerEntry::new(id, label))
        })
        .collect()
}

fn legacy_assignments(event: &Event, config: &BoardConfig) -> Vec<LockerEntry> {
    let games = event.games();
    if games.len() <= 1 {
        let team = event.display_title();
        let label = (!parsing::is_generic_title(team, &config.generic_keywords))
            .then(|| team.to_string());
        return digit_lockers(event.locker.as_str())
            .into_iter()
            .filter(|id| config.is_known_locker(id))
            .map(|id| LockerEntry::new(id, label.clone()))
            .collect();
    }

    let segments = locker_segments(event);
    let mut entries = Vec::new();
    for (idx, game) in games.iter().enumerate() {
        let rooms = game_rooms(&segments, idx, event);
        let label = (!parsing::is_generic_title(game, &config.generic_keywords))
            .then(|| game.clone());
        for id in digit_lockers(&rooms) {
            if config.is_known_locker(&id) {
                entries.push(LockerEntry::new(id, label.clone()));
            }
        }
    }
    entries
}

/// `raw_locker` cut at `&&`, one piece per game.
pub fn locker_segments(event: &Event) -> Vec<String> {
    let source = if event.raw_locker.is_empty() {
        event.locker.as_str()
    } else {
        event.raw_locker.as_str()
    };
    source
        .split("&&")
        .map(|segment| segment.trim().to_string())
        .collect()
}

/// Rooms text for the `idx`th game: the matching locker segment (or the
/// whole raw text when there are fewer segments than games), run back
/// through the extractor when it still contains prose.
pub fn game_rooms(segments: &[String], idx: usize, event: &Event) -> String {
    let raw = segments
        .get(idx)
        .filter(|segment| !segment.is_empty())
        .map(String::as_str)
        .unwrap_or(event.raw_locker.as_str());
    let raw = if raw.is_empty() { NO_LOCKER } else { raw };
    parsing::extract_locker(raw).unwrap_or_else(|| raw.to_string())
}

fn digit_lockers(text: &str) -> Vec<String> {
    text.split([',', '|'])
        .map(|piece| piece.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|digits| !digits.is_empty())
        .collect()
}
