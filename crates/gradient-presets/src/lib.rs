//! # Chroma Gradient Presets
//!
//! Named, reusable gradients. Built-in presets are static data; user
//! presets (always category `Custom`) live in a versioned envelope under
//! one storage key and can be imported and exported as JSON.

pub mod builtin;
pub mod collection;
pub mod store;

use std::fmt;
use serde::{Deserialize, Serialize};

use gradient::{parse_gradient, GradientDefinition};

pub use builtin::builtin_presets;
pub use collection::{
    create_preset_id, load_preset_collection, merge_presets, normalize_preset,
    parse_preset_collection, save_preset_collection, LoadedPresets, ParsedPresets,
};
pub use store::GradientPresetStore;

/// Envelope `kind` tag
pub const PRESET_COLLECTION_KIND: &str = "havdm-gradient-presets";
/// Envelope schema version
pub const PRESET_COLLECTION_VERSION: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PresetCategory {
    Material,
    Nature,
    Tech,
    Monochrome,
    #[default]
    Custom,
}

impl PresetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Nature => "Nature",
            Self::Tech => "Tech",
            Self::Monochrome => "Monochrome",
            Self::Custom => "Custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Material" => Some(Self::Material),
            "Nature" => Some(Self::Nature),
            "Tech" => Some(Self::Tech),
            "Monochrome" => Some(Self::Monochrome),
            "Custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named gradient. `css` is stored as opaque text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPreset {
    pub id: String,
    pub name: String,
    pub css: String,
    pub category: PresetCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl GradientPreset {
    /// Structured form of `css`
    pub fn definition(&self) -> GradientDefinition {
        parse_gradient(&self.css)
    }
}

/// Persisted envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPresetCollection {
    pub kind: String,
    pub version: u64,
    pub presets: Vec<GradientPreset>,
    pub last_updated: i64,
}

impl GradientPresetCollection {
    pub fn new(presets: Vec<GradientPreset>) -> Self {
        Self {
            kind: PRESET_COLLECTION_KIND.to_string(),
            version: PRESET_COLLECTION_VERSION,
            presets,
            last_updated: chroma_core::now_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    #[error("Preset name is required")]
    EmptyName,
    #[error("Preset CSS is required")]
    EmptyCss,
    #[error("Preset at index {0} is invalid: name and css are required")]
    InvalidItem(usize),
    #[error("Unsupported preset file format")]
    UnsupportedFormat,
    #[error("Unsupported preset collection kind")]
    WrongKind,
    #[error("Unsupported preset collection version")]
    UnsupportedVersion,
    #[error("Preset collection has no presets array")]
    MissingPresets,
    #[error("Saved gradient presets could not be read")]
    Unreadable,
    #[error("Invalid JSON: {0}")]
    Json(String),
}

/// Change notification
#[derive(Debug, Clone, PartialEq)]
pub enum PresetEvent {
    Saved(String),
    Deleted(String),
    Imported { added: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradient::GradientKind;

    #[test]
    fn test_category_serde() {
        assert_eq!(serde_json::to_string(&PresetCategory::Tech).unwrap(), "\"Tech\"");
        assert_eq!(PresetCategory::parse("Nature"), Some(PresetCategory::Nature));
        assert_eq!(PresetCategory::parse("nature"), None);
    }

    #[test]
    fn test_collection_shape() {
        let json = serde_json::to_value(GradientPresetCollection::new(Vec::new())).unwrap();
        assert_eq!(json["kind"], "havdm-gradient-presets");
        assert_eq!(json["version"], 1);
        assert!(json["lastUpdated"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_definition() {
        let preset = GradientPreset {
            id: "p".into(),
            name: "Glow".into(),
            css: "radial-gradient(circle at center, #fff 0%, #000 100%)".into(),
            category: PresetCategory::Custom,
            description: None,
            created_at: None,
        };
        assert_eq!(preset.definition().kind, GradientKind::Radial);
    }
}
