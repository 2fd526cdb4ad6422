//! Text rendering helpers shared by the tool formatters.

/// Shorten `text` to at most `max` characters, appending "..." when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// Render a number without a trailing ".0" when it is whole.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Rating or "N/A".
pub fn rating(value: Option<f64>) -> String {
    value.map(number).unwrap_or_else(|| "N/A".to_string())
}

/// Dollar amount or "N/A".
pub fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Join the first `n` items with ", ".
pub fn join_first(items: &[String], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Capitalize the first letter of every word; underscores become spaces.
pub fn title_case(text: &str) -> String {
    text.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
        // multibyte text is cut on character boundaries
        assert_eq!(truncate("ñandú ñandú", 5), "ñandú...");
    }

    #[test]
    fn test_number() {
        assert_eq!(number(12.0), "12");
        assert_eq!(number(4.75), "4.8");
        assert_eq!(number(-3.0), "-3");
    }

    #[test]
    fn test_rating_and_money() {
        assert_eq!(rating(Some(4.5)), "4.5");
        assert_eq!(rating(None), "N/A");
        assert_eq!(money(Some(420.0)), "$420.00");
    }

    #[test]
    fn test_join_first() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(join_first(&items, 2), "a, b");
        assert_eq!(join_first(&items, 5), "a, b, c");
        assert_eq!(join_first(&[], 2), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("tourist_attraction"), "Tourist Attraction");
        assert_eq!(title_case("mid-range"), "Mid-range");
        assert_eq!(title_case("ITALIAN food"), "Italian Food");
    }
}
