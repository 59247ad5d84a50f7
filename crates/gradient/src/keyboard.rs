//! Arrow-key nudging for the angle and stop position inputs

use serde::{Deserialize, Serialize};

const STEP: f64 = 1.0;
const SHIFT_STEP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// Map DOM-style key names (`ArrowLeft`, ...) to arrow keys
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            _ => None,
        }
    }

    fn sign(&self) -> f64 {
        match self {
            Self::Left | Self::Down => -1.0,
            Self::Right | Self::Up => 1.0,
        }
    }
}

fn step(key: ArrowKey, shift: bool) -> f64 {
    key.sign() * if shift { SHIFT_STEP } else { STEP }
}

/// Nudge an angle, clamped to [0, 360]
pub fn adjust_angle_for_arrow(angle: f64, key: ArrowKey, shift: bool) -> f64 {
    (angle + step(key, shift)).clamp(0.0, 360.0)
}

/// Nudge a stop position, clamped to [0, 100]
pub fn adjust_stop_position_for_arrow(position: f64, key: ArrowKey, shift: bool) -> f64 {
    (position + step(key, shift)).clamp(0.0, 100.0)
}
