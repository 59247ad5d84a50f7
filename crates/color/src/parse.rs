//! CSS color text parsing and formatting

use once_cell::sync::Lazy;
use regex::Regex;

use crate::convert::{hex_to_rgba, hsla_to_rgba, rgba_to_hex, rgba_to_hsla};
use crate::hex::validate_hex;
use crate::{Hsla, Rgba};

static RGB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$")
        .unwrap()
});

static HSL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^hsla?\(\s*(-?\d*\.?\d+)\s*,\s*(\d*\.?\d+)%\s*,\s*(\d*\.?\d+)%\s*(?:,\s*(\d*\.?\d+)\s*)?\)$")
        .unwrap()
});

const FALLBACK_HEX: &str = "#000000";
const FALLBACK_RGBA: &str = "rgba(0,0,0,1)";
const FALLBACK_HSLA: &str = "hsla(0,0%,0%,1)";

/// Parse `#hex`, `rgb[a](...)` or `hsl[a](...)` text.
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_color(text: &str) -> Option<Rgba> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.starts_with('#') {
        if !validate_hex(text).valid {
            return None;
        }
        return hex_to_rgba(text);
    }

    if let Some(cap) = RGB_PATTERN.captures(text) {
        let channel = |i: usize| -> Option<u8> {
            let v: u32 = cap.get(i)?.as_str().parse().ok()?;
            Some(v.min(255) as u8)
        };
        let a = alpha(cap.get(4).map(|m| m.as_str()))?;
        return Some(Rgba::new(channel(1)?, channel(2)?, channel(3)?, a));
    }

    if let Some(cap) = HSL_PATTERN.captures(text) {
        let number = |i: usize| -> Option<f64> { cap.get(i)?.as_str().parse().ok() };
        let h = number(1)?.rem_euclid(360.0);
        let s = number(2)?.clamp(0.0, 100.0);
        let l = number(3)?.clamp(0.0, 100.0);
        let a = alpha(cap.get(4).map(|m| m.as_str()))?;
        return Some(hsla_to_rgba(&Hsla::new(h, s, l, a)));
    }

    None
}

fn alpha(text: Option<&str>) -> Option<f64> {
    match text {
        Some(a) => a.parse::<f64>().ok().map(|a| a.clamp(0.0, 1.0)),
        None => Some(1.0),
    }
}

/// `rgb(r, g, b)` when opaque, otherwise `rgba(r, g, b, a)` with two decimals
pub fn format_rgba(rgba: &Rgba) -> String {
    if rgba.is_opaque() {
        format!("rgb({}, {}, {})", rgba.r, rgba.g, rgba.b)
    } else {
        format!("rgba({}, {}, {}, {:.2})", rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

/// `hsl(h, s%, l%)` when opaque, otherwise `hsla(h, s%, l%, a)`; components as integers
pub fn format_hsla(hsla: &Hsla) -> String {
    let h = (hsla.h.round() as i64).rem_euclid(360);
    let s = hsla.s.round() as i64;
    let l = hsla.l.round() as i64;

    if hsla.a >= 1.0 {
        format!("hsl({}, {}%, {}%)", h, s, l)
    } else {
        format!("hsla({}, {}%, {}%, {:.2})", h, s, l, hsla.a)
    }
}

/// Any color text to lowercase hex, `#000000` if it does not parse
pub fn to_hex(text: &str) -> String {
    parse_color(text)
        .map(|c| rgba_to_hex(&c))
        .unwrap_or_else(|| FALLBACK_HEX.to_string())
}

/// Any color text to `rgb[a](...)`, `rgba(0,0,0,1)` if it does not parse
pub fn to_rgba_string(text: &str) -> String {
    parse_color(text)
        .map(|c| format_rgba(&c))
        .unwrap_or_else(|| FALLBACK_RGBA.to_string())
}

/// Any color text to `hsl[a](...)`, `hsla(0,0%,0%,1)` if it does not parse
pub fn to_hsla_string(text: &str) -> String {
    parse_color(text)
        .map(|c| format_hsla(&rgba_to_hsla(&c)))
        .unwrap_or_else(|| FALLBACK_HSLA.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#ff0000"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(parse_color(" #FFF "), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(parse_color("#abcd"), None);
        assert_eq!(parse_color("#"), None);
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some(Rgba::opaque(10, 20, 30)));
        assert_eq!(parse_color("RGBA(10,20,30,0.5)"), Some(Rgba::new(10, 20, 30, 0.5)));
        assert_eq!(parse_color("rgba(10, 20, 30, .25)"), Some(Rgba::new(10, 20, 30, 0.25)));
        assert_eq!(parse_color("rgb(300, 0, 0)"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(parse_color("rgb(10%, 0, 0)"), None);
        assert_eq!(parse_color("rgb(calc(1), 0, 0)"), None);
    }

    #[test]
    fn test_parse_hsl() {
        assert_eq!(parse_color("hsl(0, 100%, 50%)"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(parse_color("hsla(240, 100%, 50%, 0.5)"), Some(Rgba::new(0, 0, 255, 0.5)));
        assert_eq!(parse_color("hsl(120, 100, 50)"), None);
    }

    #[test]
    fn test_parse_rejects_other_text() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("var(--primary-color)"), None);
        assert_eq!(parse_color("linear-gradient(90deg, #fff 0%, #000 100%)"), None);
    }

    #[test]
    fn test_red_to_hsl_string() {
        let red = parse_color("#ff0000").unwrap();
        assert_eq!(red, Rgba::new(255, 0, 0, 1.0));
        assert_eq!(format_hsla(&rgba_to_hsla(&red)), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_format() {
        assert_eq!(format_rgba(&Rgba::opaque(1, 2, 3)), "rgb(1, 2, 3)");
        assert_eq!(format_rgba(&Rgba::new(1, 2, 3, 0.333)), "rgba(1, 2, 3, 0.33)");
        assert_eq!(format_hsla(&Hsla::new(359.7, 49.5, 10.2, 1.0)), "hsl(0, 50%, 10%)");
        assert_eq!(format_hsla(&Hsla::new(200.0, 10.0, 20.0, 0.5)), "hsla(200, 10%, 20%, 0.50)");
    }

    #[test]
    fn test_derived_helpers() {
        assert_eq!(to_hex("rgb(255, 128, 0)"), "#ff8000");
        assert_eq!(to_hex("garbage"), "#000000");
        assert_eq!(to_rgba_string("#00ff0080"), "rgba(0, 255, 0, 0.50)");
        assert_eq!(to_rgba_string(""), "rgba(0,0,0,1)");
        assert_eq!(to_hsla_string("#0000ff"), "hsl(240, 100%, 50%)");
        assert_eq!(to_hsla_string("nope"), "hsla(0,0%,0%,1)");
    }
}
