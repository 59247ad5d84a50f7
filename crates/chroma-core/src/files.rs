//! File import/export capability
//!
//! The host supplies file dialogs; the stores only see text in and
//! text out. `None` from `read_text` and `false` from `write_text` mean
//! the user cancelled.

use std::path::PathBuf;
use async_trait::async_trait;

#[async_trait]
pub trait FileAccess: Send + Sync {
    /// Read a user-selected file
    async fn read_text(&self) -> anyhow::Result<Option<String>>;
    /// Write `contents` to a user-chosen location
    async fn write_text(&self, suggested_name: &str, contents: &str) -> anyhow::Result<bool>;
}

/// File access bound to fixed paths instead of dialogs
#[derive(Debug, Clone, Default)]
pub struct PathFileAccess {
    /// File read on import
    pub input: Option<PathBuf>,
    /// Directory written to on export
    pub output_dir: Option<PathBuf>,
}

impl PathFileAccess {
    pub fn reading(path: impl Into<PathBuf>) -> Self {
        Self { input: Some(path.into()), output_dir: None }
    }

    pub fn writing_to(dir: impl Into<PathBuf>) -> Self {
        Self { input: None, output_dir: Some(dir.into()) }
    }
}

#[async_trait]
impl FileAccess for PathFileAccess {
    async fn read_text(&self) -> anyhow::Result<Option<String>> {
        let Some(path) = &self.input else {
            return Ok(None);
        };
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Some(content))
    }

    async fn write_text(&self, suggested_name: &str, contents: &str) -> anyhow::Result<bool> {
        let Some(dir) = &self.output_dir else {
            return Ok(false);
        };
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(dir.join(suggested_name), contents).await?;
        tracing::debug!("Exported {} to {:?}", suggested_name, dir);
        Ok(true)
    }
}
