use once_cell::sync::Lazy;
use regex::Regex;

static VENUE_NOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*\(\s*wings\s+ice\s+rink\s*\)\s*").expect("valid venue note regex")
});
static LOCKER_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[-–—]\s*(?:locker(?:\s*room)?|room|rm|lr|lkr)\b.*$")
        .expect("valid locker suffix regex")
});
static PROGRAM_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\s*[-–—]\s*rink\s+program)+\s*$").expect("valid program suffix regex")
});
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^Description:\s*"([^"]+)""#).expect("valid description regex")
});

/// Strips locker/room suffixes, `– Rink Program` tails and the
/// `(Wings Ice Rink)` venue note from a title.
///
/// Stripping repeats until nothing changes, so the result is a fixpoint:
/// `clean_team_name(&clean_team_name(x)) == clean_team_name(x)`.
pub fn clean_team_name(title: &str) -> String {
    let mut current = title.trim().to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(title: &str) -> String {
    let without_note = VENUE_NOTE_RE.replace_all(title, "");
    let without_locker = LOCKER_SUFFIX_RE.replace(&without_note, "");
    let without_program = PROGRAM_SUFFIX_RE.replace(&without_locker, "");
    without_program.trim().to_string()
}

/// Pulls the quoted text out of a `Description: "..."` preamble.
pub fn parse_event_description(description: &str) -> Option<String> {
    DESCRIPTION_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// True when the title reads like a session (public skate, lessons) rather
/// than a team, matched case-insensitively against `keywords`.
pub fn is_generic_title<S: AsRef<str>>(title: &str, keywords: &[S]) -> bool {
    let lower = title.to_lowercase();
    keywords
        .iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .any(|keyword| !keyword.is_empty() && lower.contains(&keyword))
}
