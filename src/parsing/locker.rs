use once_cell::sync::Lazy;
use regex::Regex;

use super::base::{paren_runs, split_top_level};
use super::LockerPattern;

static HOME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bhome\b\s*[:#-]?\s*([A-Za-z0-9\-]+)").expect("valid home regex")
});
static AWAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\baway\b\s*[:#-]?\s*([A-Za-z0-9\-]+)").expect("valid away regex")
});
static LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:al\s*rooms?|locker\s*rooms?|lockers?|rooms?)\b\s*[:\-]?\s*([^\n\r;]+)")
        .expect("valid locker list regex")
});
static LIST_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z0-9\-]+(?:\s*\([^()]*(?:\([^()]*\)[^()]*)*\))?)")
        .expect("valid locker entry regex")
});
static AND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+and\s+").expect("valid and-separator regex"));
static SINGLE_ROOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:locker|room)\b\s*#?\s*([A-Za-z0-9\-]+(?:\s*\([^)]+\))?)")
        .expect("valid single room regex")
});
static SHORTHAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:lr|lkr)\b\s*#?\s*([A-Za-z0-9\-]+(?:\s*\([^)]+\))?)")
        .expect("valid locker shorthand regex")
});

const SEPARATOR: char = ',';

/// `Home: 1  Away: 3`, `Away-4, Home 2`.
pub struct HomeAway;

impl LockerPattern for HomeAway {
    fn pattern_id(&self) -> &'static str {
        "home_away"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let home = capture(&HOME_RE, text);
        let away = capture(&AWAY_RE, text);

        let mut parts = Vec::new();
        if let Some(token) = home {
            parts.push(format!("{token} (Home)"));
        }
        if let Some(token) = away {
            parts.push(format!("{token} (Away)"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// `Locker Rooms: 1 (Red), 3 & 4`, `AL Rooms - 2 | 5`, `Rooms 1 and 6`.
pub struct LabeledList;

impl LockerPattern for LabeledList {
    fn pattern_id(&self) -> &'static str {
        "labeled_list"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let segment = capture(&LIST_RE, text)?;
        let normalized = normalize_separators(&segment);

        let entries = split_top_level(&normalized, SEPARATOR)
            .iter()
            .filter_map(|entry| capture(&LIST_ENTRY_RE, entry))
            .map(|entry| entry.trim().to_string())
            .collect::<Vec<_>>();

        if entries.is_empty() {
            None
        } else {
            Some(entries.join(", "))
        }
    }
}

/// `Locker 3`, `Room #12`, `LR 2`, `LKR-A`.
pub struct SingleRoom;

impl LockerPattern for SingleRoom {
    fn pattern_id(&self) -> &'static str {
        "single_room"
    }

    fn extract(&self, text: &str) -> Option<String> {
        capture(&SINGLE_ROOM_RE, text).or_else(|| capture(&SHORTHAND_RE, text))
    }
}

/// Rewrites `|`, `+`, `/`, a lone `&` and the word `and` into the canonical
/// separator, but only outside parentheses. Runs of `&&` are left untouched:
/// they split games, not lockers.
pub fn normalize_separators(segment: &str) -> String {
    paren_runs(segment)
        .into_iter()
        .map(|(inside, run)| {
            if inside {
                run
            } else {
                let swapped = replace_symbol_separators(&run);
                AND_RE
                    .replace_all(&swapped, SEPARATOR.to_string().as_str())
                    .into_owned()
            }
        })
        .collect()
}

fn replace_symbol_separators(run: &str) -> String {
    let chars = run.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(run.len());

    for (idx, &ch) in chars.iter().enumerate() {
        let replaced = match ch {
            '|' | '+' | '/' => SEPARATOR,
            '&' => {
                let before = idx > 0 && chars[idx - 1] == '&';
                let after = chars.get(idx + 1) == Some(&'&');
                if before || after {
                    '&'
                } else {
                    SEPARATOR
                }
            }
            other => other,
        };
        out.push(replaced);
    }
    out
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|value| !value.is_empty())
}
