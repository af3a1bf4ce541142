use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n,;]+").expect("split pattern is valid"));

/// Normalize a raw cookie listing into distinct names.
///
/// Splits on runs of newlines, commas, and semicolons; `name=value`
/// pairs lose everything from the first `=`. Names deduplicate
/// case-insensitively (first spelling wins) and come back sorted
/// case-insensitively. Malformed input degrades to fewer tokens, never
/// an error.
pub fn parse_observed_cookies(raw: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names: Vec<String> = Vec::new();

    for token in SPLIT_RE.split(raw) {
        let mut name = token.trim();
        if let Some((before, _)) = name.split_once('=') {
            name = before.trim();
        }
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            names.push(name.to_string());
        }
    }

    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_values_and_dedupes() {
        assert_eq!(
            parse_observed_cookies("_ga=123; sess_id=abc, _ga"),
            vec!["_ga", "sess_id"]
        );
    }

    #[test]
    fn test_parse_dedupes_case_insensitively() {
        assert_eq!(parse_observed_cookies("SESSID\nsessid"), vec!["SESSID"]);
    }

    #[test]
    fn test_parse_sorts_case_insensitively() {
        assert_eq!(
            parse_observed_cookies("Zebra, apple; Mango"),
            vec!["apple", "Mango", "Zebra"]
        );
    }

    #[test]
    fn test_parse_handles_messy_separators() {
        assert_eq!(
            parse_observed_cookies("\n\n a=1 ;;; ,, b \n=orphan\n"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_observed_cookies("").is_empty());
        assert!(parse_observed_cookies("  \n ; , ").is_empty());
    }
}
