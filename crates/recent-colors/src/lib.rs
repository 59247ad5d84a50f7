//! # Chroma Recent Colors
//!
//! Most-recently-used color history: bounded, most recent first, and
//! deduplicated case-insensitively. Every change is written through to
//! the injected key-value store; write failures are logged and the
//! in-memory list stays authoritative.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use chroma_core::config::{DEFAULT_MAX_RECENT_COLORS, RECENT_COLORS_KEY};
use chroma_core::{KeyValueStore, RecentColorsConfig};

/// Persisted envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentColorsStorage {
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
}

/// Change notification
#[derive(Debug, Clone, PartialEq)]
pub enum RecentColorsEvent {
    Updated(Vec<String>),
    Cleared,
}

/// Recent color history
pub struct RecentColors {
    /// Colors, most recent first
    colors: Vec<String>,
    max_colors: usize,
    storage_key: String,
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<RecentColorsEvent>,
}

impl RecentColors {
    /// Open the history under the default key and size
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(store, RECENT_COLORS_KEY, DEFAULT_MAX_RECENT_COLORS)
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &RecentColorsConfig) -> Self {
        Self::with_options(store, &config.storage_key, config.max_colors)
    }

    /// Open the history, loading whatever is persisted under `storage_key`.
    ///
    /// A missing or unreadable entry starts an empty history.
    pub fn with_options(store: Arc<dyn KeyValueStore>, storage_key: &str, max_colors: usize) -> Self {
        let (events, _) = broadcast::channel(16);
        let mut recent = Self {
            colors: Vec::new(),
            max_colors,
            storage_key: storage_key.to_string(),
            store,
            events,
        };
        recent.colors = recent.load();
        recent
    }

    /// Subscribe to changes
    pub fn subscribe(&self) -> broadcast::Receiver<RecentColorsEvent> {
        self.events.subscribe()
    }

    /// Colors, most recent first
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Move `color` to the front, normalized to trimmed uppercase
    pub fn add(&mut self, color: &str) {
        let normalized = color.trim().to_uppercase();
        if normalized.is_empty() {
            return;
        }

        self.colors.retain(|c| !c.eq_ignore_ascii_case(&normalized));
        self.colors.insert(0, normalized);
        self.colors.truncate(self.max_colors);

        self.persist();
        let _ = self.events.send(RecentColorsEvent::Updated(self.colors.clone()));
    }

    /// Remove `color`, compared case-insensitively
    pub fn remove(&mut self, color: &str) {
        let needle = color.trim();
        if needle.is_empty() {
            return;
        }

        let before = self.colors.len();
        self.colors.retain(|c| !c.eq_ignore_ascii_case(needle));
        if self.colors.len() == before {
            return;
        }

        self.persist();
        let _ = self.events.send(RecentColorsEvent::Updated(self.colors.clone()));
    }

    /// Empty the history and delete the persisted entry
    pub fn clear(&mut self) {
        self.colors.clear();

        if let Err(e) = self.store.remove(&self.storage_key) {
            tracing::warn!("Failed to clear recent colors: {}", e);
        }
        let _ = self.events.send(RecentColorsEvent::Cleared);
    }

    fn load(&self) -> Vec<String> {
        let raw = match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read recent colors: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<RecentColorsStorage>(&raw) {
            Ok(mut stored) => {
                stored.colors.truncate(self.max_colors);
                tracing::debug!("Loaded {} recent colors", stored.colors.len());
                stored.colors
            }
            Err(e) => {
                tracing::warn!("Ignoring corrupt recent colors entry: {}", e);
                Vec::new()
            }
        }
    }

    fn persist(&self) {
        let envelope = RecentColorsStorage {
            colors: self.colors.clone(),
            last_updated: Some(chroma_core::now_millis()),
        };

        let result = serde_json::to_string(&envelope)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&self.storage_key, &json).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!("Failed to save recent colors: {}", e);
        }
    }
}
