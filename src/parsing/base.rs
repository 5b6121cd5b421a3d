pub fn clean_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Splits on `separator` wherever it sits outside parentheses. Pieces are
/// trimmed and empty pieces dropped. Unbalanced closing parens never push the
/// depth below zero.
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c == separator && depth == 0 => {
                push_trimmed(&mut pieces, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_trimmed(&mut pieces, &current);
    pieces
}

/// Cuts `text` into alternating runs that sit outside (`false`) and inside
/// (`true`) parentheses. The parens themselves belong to the inside run.
pub fn paren_runs(text: &str) -> Vec<(bool, String)> {
    let mut runs: Vec<(bool, String)> = Vec::new();
    let mut depth = 0usize;

    for ch in text.chars() {
        let inside = match ch {
            '(' => {
                depth += 1;
                true
            }
            ')' => {
                let was_inside = depth > 0;
                depth = depth.saturating_sub(1);
                was_inside
            }
            _ => depth > 0,
        };
        match runs.last_mut() {
            Some((last_inside, run)) if *last_inside == inside => run.push(ch),
            _ => runs.push((inside, ch.to_string())),
        }
    }
    runs
}

/// Tries each candidate field in order until `extract` yields something.
pub fn first_match<T, F>(candidates: &[&str], extract: F) -> Option<T>
where
    F: Fn(&str) -> Option<T>,
{
    candidates.iter().find_map(|text| extract(text))
}

fn push_trimmed(pieces: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        pieces.push(trimmed.to_string());
    }
}
