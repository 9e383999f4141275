//! Table formatting utilities for CLI output.

/// Truncates a string to at most `max_chars` characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use routewatch_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// A horizontal separator line.
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_string("/caf\u{e9}/men\u{fc}", 8), "/caf\u{e9}...");
        assert_eq!(truncate_string("/caf\u{e9}", 5), "/caf\u{e9}");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_string("abcdef", 2), "...");
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3), "---");
    }
}
