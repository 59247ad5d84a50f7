//! # Chroma Gradient
//!
//! Structured CSS gradients: parsing the `linear-gradient(...)` and
//! `radial-gradient(...)` forms the editor produces, serializing them
//! back, and the stop edits and keyboard nudges the editing UI needs.
//!
//! Every operation returns a new value; nothing is mutated in place.

pub mod css;
pub mod keyboard;
pub mod stops;

use std::fmt;
use serde::{Deserialize, Serialize};

pub use css::{gradient_to_css, is_gradient_string, parse_gradient};
pub use keyboard::{adjust_angle_for_arrow, adjust_stop_position_for_arrow, ArrowKey};
pub use stops::{add_stop, remove_stop, reorder_stops, update_stop, StopPatch};

/// Angle used when a linear gradient has none
pub const DEFAULT_ANGLE: f64 = 90.0;
/// Radial position used when none is given
pub const DEFAULT_POSITION: &str = "center";

/// Gradient type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// Radial gradient shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RadialShape {
    #[default]
    Circle,
    Ellipse,
}

impl RadialShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
        }
    }
}

/// A color anchored at a percentage along the gradient axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub id: String,
    pub color: String,
    /// Always within [0, 100]
    pub position: f64,
}

impl GradientStop {
    pub fn new(id: impl Into<String>, color: impl Into<String>, position: f64) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            position: clamp_position(position),
        }
    }
}

/// Structured gradient.
///
/// `angle` only applies to linear gradients and `shape`/`position` only
/// to radial ones, but all fields are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDefinition {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub angle: f64,
    pub shape: RadialShape,
    pub position: String,
    pub stops: Vec<GradientStop>,
}

impl Default for GradientDefinition {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            angle: DEFAULT_ANGLE,
            shape: RadialShape::Circle,
            position: DEFAULT_POSITION.to_string(),
            stops: default_stops(),
        }
    }
}

impl GradientDefinition {
    pub fn to_css(&self) -> String {
        gradient_to_css(self)
    }
}

impl fmt::Display for GradientDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&gradient_to_css(self))
    }
}

/// The two stops of the built-in default gradient
pub fn default_stops() -> Vec<GradientStop> {
    vec![
        GradientStop::new("stop-1", "#03A9F4", 0.0),
        GradientStop::new("stop-2", "#0D47A1", 100.0),
    ]
}

pub(crate) fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        return 0.0;
    }
    position.clamp(0.0, 100.0)
}
