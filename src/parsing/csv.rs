/// Decodes comma-separated text into rows of raw cells.
///
/// Quoted cells may hold commas, line breaks and `""` escapes. `\n` and `\r`
/// both end a row, but a terminator that closes no content emits nothing, so
/// `\r\n` line endings and blank trailing lines never produce empty rows.
/// Malformed input (an unterminated quote, say) is decoded best-effort.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(std::mem::take(&mut cell)),
            '\n' | '\r' if !in_quotes => {
                if !cell.is_empty() || !row.is_empty() {
                    row.push(std::mem::take(&mut cell));
                    rows.push(std::mem::take(&mut row));
                }
            }
            _ => cell.push(ch),
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &[&str]) -> Vec<String> {
        row.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn doubled_quotes_and_embedded_commas() {
        assert_eq!(parse_csv(r#""a,b""c""#), vec![cells(&["a,b\"c"])]);
    }

    #[test]
    fn quoted_line_breaks_stay_in_the_cell() {
        let rows = parse_csv("start,desc\n\"x\",\"Rooms: 1\nHome 2\"\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], cells(&["x", "Rooms: 1\nHome 2"]));
    }

    #[test]
    fn crlf_is_a_single_terminator() {
        let rows = parse_csv("a,b\r\nc,d\r\n\r\n");
        assert_eq!(rows, vec![cells(&["a", "b"]), cells(&["c", "d"])]);
    }

    #[test]
    fn bare_carriage_return_ends_a_row() {
        assert_eq!(parse_csv("a\rb"), vec![cells(&["a"]), cells(&["b"])]);
        assert_eq!(
            parse_csv("a,b\rc,d\r"),
            vec![cells(&["a", "b"]), cells(&["c", "d"])]
        );
    }

    #[test]
    fn trailing_row_without_terminator() {
        assert_eq!(parse_csv("a\nb,c"), vec![cells(&["a"]), cells(&["b", "c"])]);
    }

    #[test]
    fn explicit_empty_last_field_counts() {
        assert_eq!(parse_csv("a,\n"), vec![cells(&["a", ""])]);
        assert_eq!(parse_csv(",\n"), vec![cells(&["", ""])]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n\r\n\n").is_empty());
    }

    #[test]
    fn unterminated_quote_is_best_effort() {
        assert_eq!(parse_csv("\"abc,def\nghi"), vec![cells(&["abc,def\nghi"])]);
    }
}
