//! Palette store

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::broadcast;

use chroma_core::config::{COLOR_PALETTES_KEY, DEFAULT_MAX_PALETTE_COLORS};
use chroma_core::{FileAccess, KeyValueStore, PaletteConfig};

use crate::transfer::{self, ImportResult};
use crate::{ColorPalette, ColorPaletteStorage, PaletteEvent, DEFAULT_PALETTE_NAME, PALETTE_STORAGE_VERSION};
use crate::normalize::normalize_palette_color;

/// Owns the palette collection and writes every change through to storage.
///
/// Default palettes are read-only apart from renaming.
pub struct PaletteStore {
    state: ColorPaletteStorage,
    max_colors: usize,
    storage_key: String,
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<PaletteEvent>,
}

impl PaletteStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(store, COLOR_PALETTES_KEY, DEFAULT_MAX_PALETTE_COLORS)
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &PaletteConfig) -> Self {
        Self::with_options(store, &config.storage_key, config.max_colors)
    }

    /// Load the persisted collection, or seed the defaults if there is none
    pub fn with_options(store: Arc<dyn KeyValueStore>, storage_key: &str, max_colors: usize) -> Self {
        let (events, _) = broadcast::channel(32);
        let state = load_state(store.as_ref(), storage_key);
        Self {
            state,
            max_colors,
            storage_key: storage_key.to_string(),
            store,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PaletteEvent> {
        self.events.subscribe()
    }

    pub fn palettes(&self) -> &[ColorPalette] {
        &self.state.palettes
    }

    pub fn palette(&self, id: &str) -> Option<&ColorPalette> {
        self.state.palettes.iter().find(|p| p.id == id)
    }

    pub fn active_palette_id(&self) -> Option<&str> {
        self.state.active_palette_id.as_deref()
    }

    pub fn active_palette(&self) -> Option<&ColorPalette> {
        self.active_palette_id().and_then(|id| self.palette(id))
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Select a palette; `false` if no palette has that id
    pub fn set_active_palette(&mut self, id: &str) -> bool {
        if self.palette(id).is_none() {
            return false;
        }
        self.state.active_palette_id = Some(id.to_string());
        self.persist();
        self.emit(PaletteEvent::ActiveChanged(Some(id.to_string())));
        true
    }

    /// Create an empty user palette and make it active
    pub fn create_palette(&mut self, name: Option<&str>) -> ColorPalette {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PALETTE_NAME);
        let now = chroma_core::now_millis();

        let palette = ColorPalette {
            id: chroma_core::new_id("palette"),
            name: name.to_string(),
            description: None,
            colors: Vec::new(),
            is_default: false,
            created_at: now,
            updated_at: now,
        };

        self.insert_active(palette.clone());
        palette
    }

    /// Copy a palette under a non-colliding name and make the copy active
    pub fn duplicate_palette(&mut self, id: &str) -> Option<ColorPalette> {
        let source = self.palette(id)?.clone();
        let now = chroma_core::now_millis();

        let copy = ColorPalette {
            id: chroma_core::new_id("palette"),
            name: self.copy_name(&source.name),
            description: source.description,
            colors: source.colors,
            is_default: false,
            created_at: now,
            updated_at: now,
        };

        self.insert_active(copy.clone());
        Some(copy)
    }

    /// Rename a palette. A blank name keeps the old one; `updated_at` is
    /// bumped either way. Default palettes may be renamed.
    pub fn rename_palette(&mut self, id: &str, name: &str) -> bool {
        let Some(palette) = self.palette_mut(id) else {
            return false;
        };

        let name = name.trim();
        if !name.is_empty() {
            palette.name = name.to_string();
        }
        palette.updated_at = chroma_core::now_millis();

        self.persist();
        self.emit(PaletteEvent::Updated(id.to_string()));
        true
    }

    /// Delete a user palette. If it was active, fall back to the first
    /// remaining user palette, else the first palette of any kind.
    pub fn delete_palette(&mut self, id: &str) -> bool {
        let Some(index) = self.state.palettes.iter().position(|p| p.id == id) else {
            return false;
        };
        if self.state.palettes[index].is_default {
            return false;
        }

        self.state.palettes.remove(index);

        let was_active = self.state.active_palette_id.as_deref() == Some(id);
        if was_active {
            self.state.active_palette_id = self
                .state
                .palettes
                .iter()
                .find(|p| !p.is_default)
                .or_else(|| self.state.palettes.first())
                .map(|p| p.id.clone());
        }

        self.persist();
        self.emit(PaletteEvent::Deleted(id.to_string()));
        if was_active {
            self.emit(PaletteEvent::ActiveChanged(self.state.active_palette_id.clone()));
        }
        true
    }

    /// Add a color to a user palette.
    ///
    /// Returns `false` only when `color` is not a valid color. A valid
    /// color that is already present, or a palette that is full, default
    /// or missing, still returns `true` without changing anything.
    pub fn add_color(&mut self, id: &str, color: &str) -> bool {
        let Some(normalized) = normalize_palette_color(color) else {
            return false;
        };

        let max_colors = self.max_colors;
        let Some(palette) = self.editable_mut(id) else {
            return true;
        };
        if palette.colors.contains(&normalized) || palette.colors.len() >= max_colors {
            return true;
        }

        palette.colors.push(normalized);
        palette.updated_at = chroma_core::now_millis();

        self.persist();
        self.emit(PaletteEvent::Updated(id.to_string()));
        true
    }

    /// Remove a color from a user palette
    pub fn remove_color(&mut self, id: &str, color: &str) {
        let Some(normalized) = normalize_palette_color(color) else {
            return;
        };
        let Some(palette) = self.editable_mut(id) else {
            return;
        };

        let before = palette.colors.len();
        palette.colors.retain(|c| *c != normalized);
        if palette.colors.len() == before {
            return;
        }
        palette.updated_at = chroma_core::now_millis();

        self.persist();
        self.emit(PaletteEvent::Updated(id.to_string()));
    }

    /// Move the color at `from` to `to` within a user palette
    pub fn reorder_colors(&mut self, id: &str, from: usize, to: usize) {
        let Some(palette) = self.editable_mut(id) else {
            return;
        };
        let len = palette.colors.len();
        if from >= len || to >= len || from == to {
            return;
        }

        let color = palette.colors.remove(from);
        palette.colors.insert(to, color);
        palette.updated_at = chroma_core::now_millis();

        self.persist();
        self.emit(PaletteEvent::Updated(id.to_string()));
    }

    /// Import palettes from an exported JSON array. Imported palettes get
    /// fresh ids and timestamps and are never default.
    pub fn import_palettes(&mut self, json: &str) -> ImportResult {
        let (imported, errors) = transfer::parse_import(json, self.max_colors);
        let now = chroma_core::now_millis();
        let added = imported.len();

        for entry in imported {
            self.state.palettes.push(ColorPalette {
                id: chroma_core::new_id("palette"),
                name: entry.name,
                description: entry.description,
                colors: entry.colors,
                is_default: false,
                created_at: now,
                updated_at: now,
            });
        }

        if added > 0 {
            tracing::info!("Imported {} palettes", added);
            self.persist();
            self.emit(PaletteEvent::Imported { added });
        }

        ImportResult {
            added,
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }

    /// JSON array of every palette, without ids or timestamps
    pub fn export_palettes(&self) -> String {
        transfer::export_json(&self.state.palettes)
    }

    /// CSS custom properties for every palette color
    pub fn export_css_variables(&self) -> String {
        transfer::css_variables(&self.state.palettes)
    }

    /// Import from a user-selected file; `None` if the user cancelled
    pub async fn import_from(&mut self, files: &dyn FileAccess) -> anyhow::Result<Option<ImportResult>> {
        let Some(json) = files.read_text().await? else {
            return Ok(None);
        };
        Ok(Some(self.import_palettes(&json)))
    }

    /// Export to a user-chosen file; `false` if the user cancelled
    pub async fn export_to(&self, files: &dyn FileAccess) -> anyhow::Result<bool> {
        let json = self.export_palettes();
        files.write_text("color-palettes.json", &json).await
    }

    fn palette_mut(&mut self, id: &str) -> Option<&mut ColorPalette> {
        self.state.palettes.iter_mut().find(|p| p.id == id)
    }

    fn editable_mut(&mut self, id: &str) -> Option<&mut ColorPalette> {
        self.palette_mut(id).filter(|p| !p.is_default)
    }

    fn insert_active(&mut self, palette: ColorPalette) {
        let id = palette.id.clone();
        self.state.palettes.push(palette);
        self.state.active_palette_id = Some(id.clone());

        self.persist();
        self.emit(PaletteEvent::Created(id.clone()));
        self.emit(PaletteEvent::ActiveChanged(Some(id)));
    }

    /// `"<name> (copy)"`, then `"<name> (copy) 2"`, `3`, ... until unused
    fn copy_name(&self, name: &str) -> String {
        let taken: HashSet<&str> = self.state.palettes.iter().map(|p| p.name.as_str()).collect();

        let base = format!("{} (copy)", name);
        if !taken.contains(base.as_str()) {
            return base;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{} {}", base, n);
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn emit(&self, event: PaletteEvent) {
        let _ = self.events.send(event);
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.state)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&self.storage_key, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!("Failed to save color palettes: {}", e);
        }
    }
}

fn load_state(store: &dyn KeyValueStore, key: &str) -> ColorPaletteStorage {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ColorPaletteStorage::seeded(),
        Err(e) => {
            tracing::warn!("Failed to read color palettes: {}", e);
            return ColorPaletteStorage::seeded();
        }
    };

    match serde_json::from_str::<ColorPaletteStorage>(&raw) {
        Ok(mut state) => {
            if state.version != PALETTE_STORAGE_VERSION {
                tracing::debug!(
                    "Color palette storage version {} corrected to {}",
                    state.version,
                    PALETTE_STORAGE_VERSION
                );
                state.version = PALETTE_STORAGE_VERSION;
            }
            state
        }
        Err(e) => {
            tracing::warn!("Ignoring corrupt color palette entry: {}", e);
            ColorPaletteStorage::seeded()
        }
    }
}
