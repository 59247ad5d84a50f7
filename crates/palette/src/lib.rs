//! # Chroma Palette
//!
//! Named collections of favorite colors. A handful of read-only default
//! palettes are seeded on first run; everything else is user-owned.
//! Palettes can be exported as JSON or as CSS custom properties, and
//! JSON exports can be imported back (always with fresh identity).

pub mod defaults;
pub mod normalize;
pub mod store;
pub mod transfer;

use serde::{Deserialize, Serialize};

pub use defaults::default_palettes;
pub use normalize::normalize_palette_color;
pub use store::PaletteStore;
pub use transfer::{ImportError, ImportResult, PaletteExport};

/// Schema version of the persisted envelope
pub const PALETTE_STORAGE_VERSION: u32 = 1;

/// Name given to palettes created without one
pub const DEFAULT_PALETTE_NAME: &str = "New Palette";

/// A named, ordered, deduplicated list of colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Persisted envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPaletteStorage {
    #[serde(default)]
    pub version: u32,
    pub palettes: Vec<ColorPalette>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_palette_id: Option<String>,
}

impl ColorPaletteStorage {
    /// Fresh envelope holding the default palettes, the first one active
    pub fn seeded() -> Self {
        let palettes = default_palettes();
        let active_palette_id = palettes.first().map(|p| p.id.clone());
        Self {
            version: PALETTE_STORAGE_VERSION,
            palettes,
            active_palette_id,
        }
    }
}

/// Change notification
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    Created(String),
    Updated(String),
    Deleted(String),
    ActiveChanged(Option<String>),
    Imported { added: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_json_shape() {
        let storage = ColorPaletteStorage::seeded();
        let json = serde_json::to_value(&storage).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["activePaletteId"], storage.palettes[0].id.as_str());
        assert_eq!(json["palettes"][0]["isDefault"], true);
        assert!(json["palettes"][0].get("createdAt").is_some());
    }
}
