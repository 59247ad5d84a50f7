//! Palette color normalization

use once_cell::sync::Lazy;
use regex::Regex;

use color::{normalize_hex, parse_color, rgba_to_hex};

static VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^var\(\s*--[A-Za-z0-9_-]+\s*(?:,[^)]*)?\)$").unwrap());

static HEX_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3,4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap()
});

/// Canonical form of a palette color, `None` if it is not one.
///
/// Parsable colors become uppercase `#RRGGBB[AA]`; `var(--name)`
/// references are kept verbatim; other hex literals (e.g. `#RGBA`) are
/// uppercased.
pub fn normalize_palette_color(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if VAR_PATTERN.is_match(text) {
        return Some(text.to_string());
    }

    if let Some(rgba) = parse_color(text) {
        return Some(normalize_hex(&rgba_to_hex(&rgba)));
    }

    if HEX_LITERAL.is_match(text) {
        return Some(normalize_hex(text));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_palette_color("#abc").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_palette_color(" #aaBBcc ").as_deref(), Some("#AABBCC"));
        assert_eq!(normalize_palette_color("rgb(255, 0, 0)").as_deref(), Some("#FF0000"));
        assert_eq!(normalize_palette_color("rgba(0, 0, 0, 0.5)").as_deref(), Some("#00000080"));
        assert_eq!(normalize_palette_color("hsl(120, 100%, 50%)").as_deref(), Some("#00FF00"));
    }

    #[test]
    fn test_var_references_kept() {
        assert_eq!(
            normalize_palette_color("var(--primary-color)").as_deref(),
            Some("var(--primary-color)")
        );
        assert_eq!(normalize_palette_color("var(primary)"), None);
    }

    #[test]
    fn test_four_digit_hex_accepted() {
        assert_eq!(normalize_palette_color("#abcd").as_deref(), Some("#ABCD"));
    }

    #[test]
    fn test_rejects() {
        assert_eq!(normalize_palette_color(""), None);
        assert_eq!(normalize_palette_color("not-a-color"), None);
        assert_eq!(normalize_palette_color("#12345"), None);
        assert_eq!(normalize_palette_color("red"), None);
    }
}
