//! Color space conversions

use crate::{Hsl, Hsla, Rgb, Rgba};

/// Parse 3, 6 or 8 hex digits (with or without `#`) into RGBA.
///
/// Shorthand digits are doubled; the optional fourth byte maps to alpha
/// via `/255`. Returns `None` for any other length or non-hex digits.
pub fn hex_to_rgba(hex: &str) -> Option<Rgba> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => {
            let r = byte(&hex[0..1].repeat(2))?;
            let g = byte(&hex[1..2].repeat(2))?;
            let b = byte(&hex[2..3].repeat(2))?;
            Some(Rgba::opaque(r, g, b))
        }
        6 => Some(Rgba::opaque(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        8 => {
            let a = byte(&hex[6..8])? as f64 / 255.0;
            Some(Rgba::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?, a))
        }
        _ => None,
    }
}

/// Lowercase `#rrggbb`, with an alpha byte only when `a < 1`
pub fn rgba_to_hex(rgba: &Rgba) -> String {
    if rgba.is_opaque() {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        let a = (rgba.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, a)
    }
}

/// RGB to HSL. Components are kept to two decimals.
pub fn rgb_to_hsl(rgb: &Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, round2(l * 100.0));
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    let h = round2(h * 60.0).rem_euclid(360.0);
    Hsl::new(h, round2(s * 100.0), round2(l * 100.0))
}

/// HSL to RGB, channels rounded to the nearest integer
pub fn hsl_to_rgb(hsl: &Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        channel(hue_to_rgb(p, q, h)),
        channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

pub fn rgba_to_hsla(rgba: &Rgba) -> Hsla {
    rgb_to_hsl(&rgba.rgb()).with_alpha(rgba.a)
}

pub fn hsla_to_rgba(hsla: &Hsla) -> Rgba {
    hsl_to_rgb(&hsla.hsl()).with_alpha(hsla.a)
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
