//! Stop editing

use serde::{Deserialize, Serialize};

use crate::{clamp_position, default_stops, GradientStop};

/// Distance from the last stop at which a new stop is added
const ADD_STOP_OFFSET: f64 = 20.0;

/// Partial stop update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl StopPatch {
    pub fn color(color: impl Into<String>) -> Self {
        Self { color: Some(color.into()), position: None }
    }

    pub fn position(position: f64) -> Self {
        Self { color: None, position: Some(position) }
    }
}

/// Append a stop 20% past the last one (capped at 100), or at 0 if empty
pub fn add_stop(stops: &[GradientStop], color: &str) -> Vec<GradientStop> {
    let position = stops
        .last()
        .map(|s| (s.position + ADD_STOP_OFFSET).min(100.0))
        .unwrap_or(0.0);

    let mut next = stops.to_vec();
    next.push(GradientStop::new(next_stop_id(stops), color, position));
    next
}

/// Remove a stop. Removing the last one resets to the default stops.
pub fn remove_stop(stops: &[GradientStop], id: &str) -> Vec<GradientStop> {
    let next: Vec<GradientStop> = stops.iter().filter(|s| s.id != id).cloned().collect();
    if next.is_empty() {
        default_stops()
    } else {
        next
    }
}

/// Apply `patch` to the stop with `id`; positions are clamped to [0, 100]
pub fn update_stop(stops: &[GradientStop], id: &str, patch: &StopPatch) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|s| {
            if s.id != id {
                return s.clone();
            }
            let mut stop = s.clone();
            if let Some(color) = &patch.color {
                stop.color = color.clone();
            }
            if let Some(position) = patch.position {
                stop.position = clamp_position(position);
            }
            stop
        })
        .collect()
}

/// Move the stop at `from` to `to`, then renumber ids as `stop-<n>`.
///
/// Ids are positional: a stop's id changes when it moves. Out-of-range
/// indices leave the list untouched.
pub fn reorder_stops(stops: &[GradientStop], from: usize, to: usize) -> Vec<GradientStop> {
    if from >= stops.len() || to >= stops.len() {
        return stops.to_vec();
    }

    let mut next = stops.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);

    for (i, stop) in next.iter_mut().enumerate() {
        stop.id = format!("stop-{}", i + 1);
    }
    next
}

/// First `stop-<n>` id past every numbered id in use
fn next_stop_id(stops: &[GradientStop]) -> String {
    let max = stops
        .iter()
        .filter_map(|s| s.id.strip_prefix("stop-")?.parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    format!("stop-{}", max.max(stops.len()) + 1)
}
