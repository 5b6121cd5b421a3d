use once_cell::sync::Lazy;
use regex::Regex;

static RINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:rink|arena)\s*([A-Za-z])\b").expect("valid rink regex"));

/// Ice surface letter named by `Rink B` / `Arena c`, uppercased. The letter
/// must stand alone, so `Rink Program` names no rink.
pub fn extract_rink(text: &str) -> Option<char> {
    RINK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|letter| letter.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_rink_letter() {
        assert_eq!(extract_rink("Game on Rink B"), Some('B'));
        assert_eq!(extract_rink("arena a, Rooms 1"), Some('A'));
        assert_eq!(extract_rink("RinkD"), Some('D'));
    }

    #[test]
    fn requires_keyword() {
        assert_eq!(extract_rink("Public Skate"), None);
        assert_eq!(extract_rink("Ice rink 2"), None);
        assert_eq!(extract_rink("Learn to Skate - Rink Program"), None);
        assert_eq!(extract_rink(""), None);
    }
}
