//! Internal scanning primitives shared by the normalizers.
//!
//! All functions operate on pre-lowercased strings unless stated otherwise.

use std::sync::LazyLock;

use regex::Regex;

/// A signed or unsigned decimal with optional fractional part. The integer
/// part is required, so a dot left over from an abbreviation such as `"ca."`
/// never starts a token. `.` is the only decimal mark; callers convert `,`
/// beforehand.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").expect("valid decimal regex"));

/// Returns the first decimal token in `s`.
pub(crate) fn first_decimal(s: &str) -> Option<f64> {
    DECIMAL_RE
        .find_iter(s)
        .find_map(|m| m.as_str().parse::<f64>().ok())
}

/// Returns every decimal token in `s` in left-to-right order.
pub(crate) fn decimal_tokens(s: &str) -> Vec<f64> {
    DECIMAL_RE
        .find_iter(s)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Returns `true` if `token` occurs in `lower` with no letter directly before
/// or after it.
///
/// Digits and punctuation count as boundaries so `"500g"` contains `g` while
/// `"500mg"` does not. Every occurrence is tried, not just the first.
pub(crate) fn has_unit_token(lower: &str, token: &str) -> bool {
    let mut search_from = 0usize;

    while let Some(rel_pos) = lower[search_from..].find(token) {
        let abs_pos = search_from + rel_pos;
        let end_pos = abs_pos + token.len();

        let before_ok = !lower[..abs_pos]
            .chars()
            .next_back()
            .is_some_and(char::is_alphabetic);
        let after_ok = !lower[end_pos..]
            .chars()
            .next()
            .is_some_and(char::is_alphabetic);

        if before_ok && after_ok {
            return true;
        }

        // Advance by one char so overlapping occurrences are still seen.
        search_from = abs_pos
            + lower[abs_pos..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }

    false
}

/// Lower-case and collapse every whitespace run to a single space, trimming
/// both ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_decimal_finds_leading_number() {
        assert_eq!(first_decimal("ca. 0.162 kg"), Some(0.162));
        assert_eq!(first_decimal("-3.5"), Some(-3.5));
        assert_eq!(first_decimal("ca.40"), Some(40.0));
        assert_eq!(first_decimal("kein wert"), None);
    }

    #[test]
    fn abbreviation_dot_does_not_start_a_token() {
        assert_eq!(first_decimal("ca.0.162kg"), Some(0.162));
        assert_eq!(decimal_tokens("abm.40x40x42"), vec![40.0, 40.0, 42.0]);
    }

    #[test]
    fn decimal_tokens_keep_order() {
        assert_eq!(decimal_tokens("40x40x42"), vec![40.0, 40.0, 42.0]);
        assert_eq!(decimal_tokens("3.5x2"), vec![3.5, 2.0]);
        assert!(decimal_tokens("abc").is_empty());
    }

    #[test]
    fn unit_token_allows_digit_neighbours() {
        assert!(has_unit_token("500g", "g"));
        assert!(has_unit_token("500 g", "g"));
        assert!(has_unit_token("1 t", "t"));
    }

    #[test]
    fn unit_token_rejects_letter_neighbours() {
        assert!(!has_unit_token("500mg", "g"));
        assert!(!has_unit_token("gewicht", "t"));
        assert!(!has_unit_token("10mm", "m"));
    }

    #[test]
    fn unit_token_checks_later_occurrences() {
        assert!(has_unit_token("netto 2 t", "t"));
    }

    #[test]
    fn unit_token_handles_multibyte_neighbours() {
        assert!(has_unit_token("ø 20 m", "m"));
        assert!(!has_unit_token("ämm", "m"));
    }

    #[test]
    fn collapse_whitespace_trims_and_lowercases() {
        assert_eq!(collapse_whitespace("  Schraube \t M6  "), "schraube m6");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
