//! Collection parsing, validation, persistence and merging

use std::collections::HashSet;
use serde::Serialize;
use serde_json::Value;

use chroma_core::KeyValueStore;

use crate::{
    GradientPreset, GradientPresetCollection, PresetCategory, PresetError,
    PRESET_COLLECTION_KIND, PRESET_COLLECTION_VERSION,
};

/// Presets accepted from some input, with the reasons others were rejected
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedPresets {
    pub presets: Vec<GradientPreset>,
    pub added: usize,
    pub errors: Vec<String>,
}

/// Result of reading the persisted collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedPresets {
    pub presets: Vec<GradientPreset>,
    pub error: Option<String>,
}

/// `preset-<epoch-ms>-<6 random chars>`
pub fn create_preset_id() -> String {
    format!("preset-{}-{}", chroma_core::now_millis(), chroma_core::random_suffix(6))
}

/// Validate one preset object.
///
/// `name` and `css` must be non-blank strings. A missing or unknown
/// category becomes `Custom`, a missing id is generated, and
/// `description`/`createdAt` are kept only when well-typed.
pub fn normalize_preset(value: &Value) -> Option<GradientPreset> {
    let obj = value.as_object()?;

    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let name = text("name")?;
    let css = text("css")?;

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .and_then(PresetCategory::parse)
        .unwrap_or(PresetCategory::Custom);

    let id = text("id").unwrap_or_else(create_preset_id);

    let description = obj.get("description").and_then(Value::as_str).map(str::to_string);
    let created_at = obj
        .get("createdAt")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)));

    Some(GradientPreset { id, name, css, category, description, created_at })
}

/// Parse either a bare array of presets or a full envelope.
///
/// Array items are validated one by one. The envelope itself is
/// all-or-nothing: a wrong kind, version or missing `presets` array
/// yields a single error and no presets.
pub fn parse_preset_collection(raw: &Value) -> ParsedPresets {
    match raw {
        Value::Array(items) => parse_items(items),
        Value::Object(obj) => {
            if obj.get("version").and_then(Value::as_f64) != Some(PRESET_COLLECTION_VERSION as f64) {
                return rejected(PresetError::UnsupportedVersion);
            }
            if obj.get("kind").and_then(Value::as_str) != Some(PRESET_COLLECTION_KIND) {
                return rejected(PresetError::WrongKind);
            }
            match obj.get("presets").and_then(Value::as_array) {
                Some(items) => parse_items(items),
                None => rejected(PresetError::MissingPresets),
            }
        }
        _ => rejected(PresetError::UnsupportedFormat),
    }
}

fn parse_items(items: &[Value]) -> ParsedPresets {
    let mut parsed = ParsedPresets::default();
    for (index, item) in items.iter().enumerate() {
        match normalize_preset(item) {
            Some(preset) => parsed.presets.push(preset),
            None => parsed.errors.push(PresetError::InvalidItem(index).to_string()),
        }
    }
    parsed.added = parsed.presets.len();
    parsed
}

fn rejected(error: PresetError) -> ParsedPresets {
    ParsedPresets {
        presets: Vec::new(),
        added: 0,
        errors: vec![error.to_string()],
    }
}

/// Read the persisted collection.
///
/// A missing key is an empty collection with no error; unreadable
/// storage or JSON is an empty collection with a generic error.
pub fn load_preset_collection(store: &dyn KeyValueStore, key: &str) -> LoadedPresets {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadedPresets::default(),
        Err(e) => {
            tracing::warn!("Failed to read gradient presets: {}", e);
            return LoadedPresets { presets: Vec::new(), error: Some(PresetError::Unreadable.to_string()) };
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring corrupt gradient presets entry: {}", e);
            return LoadedPresets { presets: Vec::new(), error: Some(PresetError::Unreadable.to_string()) };
        }
    };

    let parsed = parse_preset_collection(&value);
    tracing::debug!("Loaded {} gradient presets", parsed.presets.len());

    LoadedPresets {
        presets: parsed.presets,
        error: if parsed.errors.is_empty() { None } else { Some(parsed.errors.join(" ")) },
    }
}

/// Write `presets` in a fresh envelope. Failures are logged.
pub fn save_preset_collection(store: &dyn KeyValueStore, presets: &[GradientPreset], key: &str) {
    let envelope = GradientPresetCollection::new(presets.to_vec());

    let result = serde_json::to_string(&envelope)
        .map_err(|e| e.to_string())
        .and_then(|json| store.set(key, &json).map_err(|e| e.to_string()));

    if let Err(e) = result {
        tracing::warn!("Failed to save gradient presets: {}", e);
    }
}

/// Append `incoming` to `existing`, re-minting any id already taken
/// (by an existing preset or an earlier incoming one).
///
/// `added` counts every incoming preset, re-identified or not.
pub fn merge_presets(existing: &[GradientPreset], incoming: Vec<GradientPreset>) -> ParsedPresets {
    let added = incoming.len();
    let mut ids: HashSet<String> = existing.iter().map(|p| p.id.clone()).collect();
    let mut presets = existing.to_vec();

    for mut preset in incoming {
        while ids.contains(&preset.id) {
            preset.id = create_preset_id();
        }
        ids.insert(preset.id.clone());
        presets.push(preset);
    }

    ParsedPresets { presets, added, errors: Vec::new() }
}
