//! # Chroma Core
//!
//! Shared plumbing for the color stores: the injected key-value
//! persistence capability, the file import/export capability,
//! configuration, logging and a few id/time helpers.

pub mod config;
pub mod files;
pub mod logging;
pub mod storage;

pub use config::{ChromaConfig, PaletteConfig, PresetConfig, RecentColorsConfig, StorageConfig};
pub use files::{FileAccess, PathFileAccess};
pub use logging::{LogLevel, UnknownLogLevel};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

use uuid::Uuid;

/// Current time as milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a unique id with the given prefix, e.g. `palette-3f2a...`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Short random suffix made of lowercase hex characters
pub fn random_suffix(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        let chunk = Uuid::new_v4().simple().to_string();
        out.push_str(&chunk[..chunk.len().min(len - out.len())]);
    }
    out
}
