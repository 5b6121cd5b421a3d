pub mod base;
pub mod csv;
pub mod gviz;
pub mod locker;
pub mod rink;
pub mod team;

pub use rink::extract_rink;
pub use team::{clean_team_name, is_generic_title, parse_event_description};

/// One layer of the locker cascade. Layers are tried most specific first.
pub trait LockerPattern: Send + Sync {
    fn pattern_id(&self) -> &'static str;
    fn extract(&self, text: &str) -> Option<String>;
}

static ACTIVE_PATTERNS: &[&dyn LockerPattern] = &[
    &locker::HomeAway,
    &locker::LabeledList,
    &locker::SingleRoom,
];

pub fn list_patterns() -> Vec<&'static str> {
    ACTIVE_PATTERNS
        .iter()
        .map(|pattern| pattern.pattern_id())
        .collect()
}

/// Runs the cascade and reports which layer produced the match.
pub fn match_locker(text: &str) -> Option<(&'static str, String)> {
    if text.trim().is_empty() {
        return None;
    }
    for pattern in ACTIVE_PATTERNS {
        if let Some(found) = pattern.extract(text) {
            return Some((pattern.pattern_id(), found));
        }
    }
    None
}

pub fn extract_locker(text: &str) -> Option<String> {
    match_locker(text).map(|(_, found)| found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_away_wins_over_list_and_shorthand() {
        assert_eq!(
            match_locker("Home: 2 Away: 4"),
            Some(("home_away", "2 (Home), 4 (Away)".to_string()))
        );
        assert_eq!(
            extract_locker("Locker Rooms: 1, 3 Home 5").as_deref(),
            Some("5 (Home)")
        );
    }

    #[test]
    fn separators_normalize_to_commas() {
        for input in [
            "Locker Rooms: 1 & 3",
            "Locker Rooms: 1 and 3",
            "Locker Rooms: 1, 3",
        ] {
            assert_eq!(extract_locker(input).as_deref(), Some("1, 3"), "{input}");
        }
    }

    #[test]
    fn blank_text_has_no_locker() {
        assert_eq!(extract_locker(""), None);
        assert_eq!(extract_locker("   "), None);
        assert_eq!(extract_locker("Public Skate"), None);
    }

    #[test]
    fn cascade_order_is_stable() {
        assert_eq!(
            list_patterns(),
            vec!["home_away", "labeled_list", "single_room"]
        );
    }
}
