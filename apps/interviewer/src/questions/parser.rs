//! Turns the model's raw numbered list into clean question strings.

/// Splits raw model output into questions: one per non-blank line, with
/// leading list markers (`*`, `-`, `1.`, `2)`) and surrounding whitespace removed.
pub fn parse_questions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(strip_list_marker)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();
    let line = trimmed.trim_start_matches(|c: char| c == '*' || c == '-' || c.is_whitespace());
    // `**1.**` wraps the number in bold; only that many closing stars belong to the marker.
    let opening_stars = trimmed[..trimmed.len() - line.len()].matches('*').count();

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            let closing_stars = rest
                .bytes()
                .take(opening_stars)
                .take_while(|b| *b == b'*')
                .count();
            return rest[closing_stars..].trim();
        }
    }
    line.trim()
}
