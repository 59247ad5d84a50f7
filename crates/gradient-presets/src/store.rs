//! Preset store

use std::sync::Arc;
use serde_json::Value;
use tokio::sync::broadcast;

use chroma_core::config::GRADIENT_PRESETS_KEY;
use chroma_core::{FileAccess, KeyValueStore, PresetConfig};

use crate::builtin::builtin_presets;
use crate::collection::{
    load_preset_collection, merge_presets, parse_preset_collection, save_preset_collection,
    ParsedPresets,
};
use crate::{GradientPreset, GradientPresetCollection, PresetCategory, PresetError, PresetEvent};

/// User presets, written through to storage on every change.
///
/// Built-in presets are not owned here; see [`GradientPresetStore::all_presets`].
pub struct GradientPresetStore {
    presets: Vec<GradientPreset>,
    error: Option<String>,
    storage_key: String,
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<PresetEvent>,
}

impl GradientPresetStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, GRADIENT_PRESETS_KEY)
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &PresetConfig) -> Self {
        Self::with_key(store, &config.storage_key)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, storage_key: &str) -> Self {
        let (events, _) = broadcast::channel(32);
        let loaded = load_preset_collection(store.as_ref(), storage_key);
        Self {
            presets: into_custom(loaded.presets),
            error: loaded.error,
            storage_key: storage_key.to_string(),
            store,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PresetEvent> {
        self.events.subscribe()
    }

    pub fn presets(&self) -> &[GradientPreset] {
        &self.presets
    }

    /// Built-ins first, then user presets
    pub fn all_presets(&self) -> Vec<GradientPreset> {
        builtin_presets().iter().chain(self.presets.iter()).cloned().collect()
    }

    pub fn preset(&self, id: &str) -> Option<&GradientPreset> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .or_else(|| builtin_presets().iter().find(|p| p.id == id))
    }

    /// Error from the last load, if the stored collection was damaged
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Save `css` under `name`.
    ///
    /// An existing preset whose name matches case-insensitively gets the
    /// new css and keeps its id; otherwise a new `Custom` preset is added.
    pub fn save_preset(&mut self, name: &str, css: &str) -> Result<GradientPreset, PresetError> {
        let name = name.trim();
        let css = css.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }
        if css.is_empty() {
            return Err(PresetError::EmptyCss);
        }

        let saved = match self
            .presets
            .iter_mut()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
        {
            Some(existing) => {
                existing.css = css.to_string();
                existing.clone()
            }
            None => {
                let preset = GradientPreset {
                    id: crate::create_preset_id(),
                    name: name.to_string(),
                    css: css.to_string(),
                    category: PresetCategory::Custom,
                    description: None,
                    created_at: Some(chroma_core::now_millis()),
                };
                self.presets.push(preset.clone());
                preset
            }
        };

        self.persist();
        self.emit(PresetEvent::Saved(saved.id.clone()));
        Ok(saved)
    }

    /// Delete a user preset; `false` if there is none with that id
    pub fn delete_preset(&mut self, id: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        if self.presets.len() == before {
            return false;
        }

        self.persist();
        self.emit(PresetEvent::Deleted(id.to_string()));
        true
    }

    /// Import an envelope or bare array, merging with fresh ids where they
    /// collide. Everything imported becomes `Custom`.
    ///
    /// The returned `presets` is the merged collection.
    pub fn import_json(&mut self, text: &str) -> ParsedPresets {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                return ParsedPresets {
                    presets: self.presets.clone(),
                    added: 0,
                    errors: vec![PresetError::Json(e.to_string()).to_string()],
                }
            }
        };

        let parsed = parse_preset_collection(&value);
        let mut merged = merge_presets(&self.presets, into_custom(parsed.presets));
        merged.errors = parsed.errors;

        if merged.added > 0 {
            tracing::info!("Imported {} gradient presets", merged.added);
            self.presets = merged.presets.clone();
            self.persist();
            self.emit(PresetEvent::Imported { added: merged.added });
        }

        merged
    }

    /// The user collection as a pretty-printed envelope
    pub fn export_json(&self) -> String {
        let envelope = GradientPresetCollection::new(self.presets.clone());
        serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| "[]".to_string())
    }

    /// Import from a user-selected file; `None` if the user cancelled
    pub async fn import_from(&mut self, files: &dyn FileAccess) -> anyhow::Result<Option<ParsedPresets>> {
        let Some(text) = files.read_text().await? else {
            return Ok(None);
        };
        Ok(Some(self.import_json(&text)))
    }

    /// Export to a user-chosen file; `false` if the user cancelled
    pub async fn export_to(&self, files: &dyn FileAccess) -> anyhow::Result<bool> {
        files.write_text("gradient-presets.json", &self.export_json()).await
    }

    fn emit(&self, event: PresetEvent) {
        let _ = self.events.send(event);
    }

    fn persist(&self) {
        save_preset_collection(self.store.as_ref(), &self.presets, &self.storage_key);
    }
}

/// Everything this store owns is a user preset, whatever it was tagged as
fn into_custom(presets: Vec<GradientPreset>) -> Vec<GradientPreset> {
    presets
        .into_iter()
        .map(|mut p| {
            p.category = PresetCategory::Custom;
            p
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use chroma_core::{MemoryStore, PathFileAccess};

    const CSS: &str = "linear-gradient(45deg, #fff 0%, #000 100%)";

    fn store() -> GradientPresetStore {
        GradientPresetStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_starts_empty() {
        let store = store();
        assert!(store.presets().is_empty());
        assert_eq!(store.error(), None);
        assert_eq!(store.all_presets().len(), builtin_presets().len());
    }

    #[test]
    fn test_save_preset() {
        let mut store = store();
        let saved = store.save_preset("  Mono  ", CSS).unwrap();
        assert_eq!(saved.name, "Mono");
        assert_eq!(saved.category, PresetCategory::Custom);
        assert!(saved.created_at.is_some());
        assert!(saved.id.starts_with("preset-"));
        assert_eq!(store.presets(), &[saved]);
    }

    #[test]
    fn test_save_requires_name_and_css() {
        let mut store = store();
        assert_eq!(store.save_preset("  ", CSS), Err(PresetError::EmptyName));
        assert_eq!(store.save_preset("x", " "), Err(PresetError::EmptyCss));
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_save_overwrites_by_name() {
        let mut store = store();
        let first = store.save_preset("Sunset", CSS).unwrap();
        let css = "radial-gradient(circle at center, #f00 0%, #00f 100%)";
        let second = store.save_preset("SUNSET", css).unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Sunset");
        assert_eq!(store.presets().len(), 1);
        assert_eq!(store.presets()[0].css, css);
    }

    #[test]
    fn test_delete_preset() {
        let mut store = store();
        let id = store.save_preset("A", CSS).unwrap().id;
        assert!(!store.delete_preset("builtin-material-1"));
        assert!(store.delete_preset(&id));
        assert!(!store.delete_preset(&id));
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_preset_lookup_includes_builtins() {
        let mut store = store();
        let id = store.save_preset("A", CSS).unwrap().id;
        assert_eq!(store.preset(&id).unwrap().name, "A");
        assert_eq!(store.preset("builtin-material-1").unwrap().name, "Blue Ocean");
        assert!(store.preset("missing").is_none());
    }

    #[test]
    fn test_persists_and_reloads() {
        let kv = Arc::new(MemoryStore::new());
        let id = GradientPresetStore::new(kv.clone()).save_preset("Kept", CSS).unwrap().id;

        let reloaded = GradientPresetStore::new(kv);
        assert_eq!(reloaded.presets().len(), 1);
        assert_eq!(reloaded.presets()[0].id, id);
        assert_eq!(reloaded.error(), None);
    }

    #[test]
    fn test_reload_writes_back_only_custom() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(
            GRADIENT_PRESETS_KEY,
            r#"[{"id":"legacy","name":"Legacy","css":"linear-gradient(90deg, #f00 0%, #00f 100%)","category":"Tech"}]"#,
        )
        .unwrap();

        let mut store = GradientPresetStore::new(kv.clone());
        assert_eq!(store.presets()[0].category, PresetCategory::Custom);
        store.save_preset("New", CSS).unwrap();

        let stored: Value = serde_json::from_str(&kv.get(GRADIENT_PRESETS_KEY).unwrap().unwrap()).unwrap();
        let presets = stored["presets"].as_array().unwrap();
        assert_eq!(presets.len(), 2);
        assert!(presets.iter().all(|p| p["category"] == "Custom"));
    }

    #[test]
    fn test_corrupt_storage_reports_error() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(GRADIENT_PRESETS_KEY, "not json").unwrap();

        let store = GradientPresetStore::new(kv);
        assert!(store.presets().is_empty());
        assert_eq!(store.error(), Some(PresetError::Unreadable.to_string().as_str()));
    }

    #[test]
    fn test_import_retags_custom() {
        let mut store = store();
        let result = store.import_json(
            r#"[{"id":"x","name":"A","css":"c","category":"Tech"},{"name":"B"}]"#,
        );
        assert_eq!(result.added, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(store.presets()[0].category, PresetCategory::Custom);
        assert_eq!(store.presets()[0].id, "x");
    }

    #[test]
    fn test_import_merge_keeps_ids_unique() {
        let mut store = store();
        let existing = store.save_preset("A", CSS).unwrap();

        let json = serde_json::to_string(&vec![existing.clone(), existing.clone()]).unwrap();
        let result = store.import_json(&json);
        assert_eq!(result.added, 2);
        assert_eq!(store.presets().len(), 3);

        let ids: HashSet<&str> = store.presets().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_import_bad_input() {
        let mut store = store();
        let result = store.import_json("{not json");
        assert_eq!(result.added, 0);
        assert_eq!(result.errors.len(), 1);

        let result = store.import_json(r#"{"kind":"havdm-gradient-presets","version":9,"presets":[]}"#);
        assert_eq!(result.errors, vec![PresetError::UnsupportedVersion.to_string()]);
        assert!(store.presets().is_empty());
    }

    #[test]
    fn test_export_then_import() {
        let mut store = store();
        store.save_preset("A", CSS).unwrap();
        store.save_preset("B", CSS).unwrap();

        let json = store.export_json();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "havdm-gradient-presets");
        assert_eq!(value["presets"].as_array().unwrap().len(), 2);

        let mut other = GradientPresetStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(other.import_json(&json).added, 2);
        assert_eq!(other.presets(), store.presets());
    }

    #[test]
    fn test_events() {
        let mut store = store();
        let mut rx = store.subscribe();

        let id = store.save_preset("A", CSS).unwrap().id;
        assert_eq!(rx.try_recv().unwrap(), PresetEvent::Saved(id.clone()));

        store.delete_preset(&id);
        assert_eq!(rx.try_recv().unwrap(), PresetEvent::Deleted(id));

        store.import_json("[]");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store();
        store.save_preset("Filed", CSS).unwrap();

        assert!(store.export_to(&PathFileAccess::writing_to(dir.path())).await.unwrap());

        let mut other = GradientPresetStore::new(Arc::new(MemoryStore::new()));
        let reader = PathFileAccess::reading(dir.path().join("gradient-presets.json"));
        let result = other.import_from(&reader).await.unwrap().unwrap();
        assert_eq!(result.added, 1);
        assert_eq!(other.presets()[0].name, "Filed");

        assert!(other.import_from(&PathFileAccess::default()).await.unwrap().is_none());
    }
}
