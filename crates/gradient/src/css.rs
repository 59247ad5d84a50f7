//! CSS gradient text
//!
//! Only the forms this system serializes are recognized:
//! `linear-gradient(<deg>deg, <stops>)` and
//! `radial-gradient(<circle|ellipse> at <position>, <stops>)`, with each
//! stop written as `<color> <percent>%`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    clamp_position, GradientDefinition, GradientKind, GradientStop, RadialShape, DEFAULT_ANGLE,
    DEFAULT_POSITION,
};

static GRADIENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^(linear|radial)-gradient\((.*)\)$").unwrap());

static ANGLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(-?\d*\.?\d+)deg$").unwrap());

static SHAPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(circle|ellipse)(?:\s+at\s+(.+))?$").unwrap());

static STOP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(var\([^)]*\)|#[0-9a-f]{3,8}|rgba?\([^)]*\)|hsla?\([^)]*\))(?:\s+(-?\d*\.?\d+)%)?$",
    )
    .unwrap()
});

static GRADIENT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)gradient\(").unwrap());

/// Serialize to CSS. Stops are emitted in ascending position order.
pub fn gradient_to_css(def: &GradientDefinition) -> String {
    let mut stops: Vec<&GradientStop> = def.stops.iter().collect();
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));

    let stops = stops
        .iter()
        .map(|s| format!("{} {}%", s.color, format_number(s.position)))
        .collect::<Vec<_>>()
        .join(", ");

    match def.kind {
        GradientKind::Linear => {
            format!("linear-gradient({}deg, {})", format_number(def.angle), stops)
        }
        GradientKind::Radial => {
            format!("radial-gradient({} at {}, {})", def.shape.as_str(), def.position, stops)
        }
    }
}

/// Parse CSS gradient text.
///
/// Never fails: empty or unrecognized input yields
/// [`GradientDefinition::default`].
pub fn parse_gradient(text: &str) -> GradientDefinition {
    let text = text.trim();
    let Some(cap) = GRADIENT_PATTERN.captures(text) else {
        return GradientDefinition::default();
    };

    let kind = if cap[1].eq_ignore_ascii_case("radial") {
        GradientKind::Radial
    } else {
        GradientKind::Linear
    };

    let mut args = split_top_level(&cap[2]);
    let mut def = GradientDefinition { kind, stops: Vec::new(), ..GradientDefinition::default() };

    if let Some(first) = args.first().cloned() {
        match kind {
            GradientKind::Linear => {
                if let Some(angle) = ANGLE_PATTERN
                    .captures(&first)
                    .and_then(|c| c[1].parse::<f64>().ok())
                {
                    def.angle = normalize_angle(angle);
                    args.remove(0);
                } else if !STOP_PATTERN.is_match(&first) {
                    // `to right` and friends: unsupported, fall back to the default angle
                    def.angle = DEFAULT_ANGLE;
                    args.remove(0);
                }
            }
            GradientKind::Radial => {
                if let Some(shape) = SHAPE_PATTERN.captures(&first) {
                    def.shape = if shape[1].eq_ignore_ascii_case("ellipse") {
                        RadialShape::Ellipse
                    } else {
                        RadialShape::Circle
                    };
                    def.position = shape
                        .get(2)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_else(|| DEFAULT_POSITION.to_string());
                    args.remove(0);
                } else if !STOP_PATTERN.is_match(&first) {
                    args.remove(0);
                }
            }
        }
    }

    def.stops = parse_stops(&args);
    if def.stops.is_empty() {
        return GradientDefinition::default();
    }
    def
}

/// Parse stop tokens. A stop without a position sits at 0 if it is the
/// first one and at 100 otherwise.
fn parse_stops(tokens: &[String]) -> Vec<GradientStop> {
    let mut stops = Vec::new();

    for token in tokens {
        let Some(cap) = STOP_PATTERN.captures(token) else {
            continue;
        };
        let position = cap
            .get(2)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(clamp_position)
            .unwrap_or(if stops.is_empty() { 0.0 } else { 100.0 });

        stops.push(GradientStop {
            id: format!("stop-{}", stops.len() + 1),
            color: cap[1].to_string(),
            position,
        });
    }

    stops
}

/// Cheap check used to gate "save as preset" without parsing
pub fn is_gradient_string(text: &str) -> bool {
    GRADIENT_MARKER.is_match(text)
}

/// Split on commas that are not inside parentheses
fn split_top_level(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts.retain(|p| !p.is_empty());
    parts
}

fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

fn format_number(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{}", v)
    }
}
