//! Hex validation and normalization

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap()
});

/// Hex validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("Color value is required")]
    Empty,
    #[error("Invalid hex color. Use #RGB, #RRGGBB or #RRGGBBAA")]
    InvalidFormat,
}

/// Result of [`validate_hex`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Uppercase `#RRGGBB[AA]` when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

impl HexValidation {
    fn ok(normalized: String) -> Self {
        Self { valid: true, error: None, normalized: Some(normalized) }
    }

    fn err(error: HexError) -> Self {
        Self { valid: false, error: Some(error.to_string()), normalized: None }
    }
}

/// Validate user hex input
pub fn validate_hex(input: &str) -> HexValidation {
    let input = input.trim();
    if input.is_empty() {
        return HexValidation::err(HexError::Empty);
    }
    if !HEX_PATTERN.is_match(input) {
        return HexValidation::err(HexError::InvalidFormat);
    }
    HexValidation::ok(normalize_hex(input))
}

/// Expand shorthand, uppercase, ensure a `#` prefix.
///
/// Input that is not hex is uppercased and prefixed but otherwise left alone.
pub fn normalize_hex(input: &str) -> String {
    let input = input.trim();
    let digits = input.strip_prefix('#').unwrap_or(input).to_uppercase();

    if digits.len() == 3 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
        format!("#{}", expanded)
    } else {
        format!("#{}", digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hex() {
        let ok = validate_hex("#abc");
        assert!(ok.valid);
        assert_eq!(ok.normalized.as_deref(), Some("#AABBCC"));
        assert_eq!(ok.error, None);

        assert_eq!(validate_hex("12345678").normalized.as_deref(), Some("#12345678"));
        assert_eq!(validate_hex(" ff0000 ").normalized.as_deref(), Some("#FF0000"));

        let bad = validate_hex("#abcd");
        assert!(!bad.valid);
        assert_eq!(bad.error, Some(HexError::InvalidFormat.to_string()));
        assert_eq!(bad.normalized, None);

        assert_eq!(validate_hex("  ").error, Some(HexError::Empty.to_string()));
        assert!(!validate_hex("#12345g").valid);
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("abc"), "#AABBCC");
        assert_eq!(normalize_hex("#AABBCC"), "#AABBCC");
        assert_eq!(normalize_hex("#a1b2c3d4"), "#A1B2C3D4");
        assert_eq!(normalize_hex("#abcd"), "#ABCD");
    }
}
