//! Upload metadata document: what to publish and its chapter text.
//!
//! The document is a TOML file with a `[record]` table for the full-length
//! recording and an optional `[shorts]` table for short-form clips. The
//! record's `timecodes` field carries the free-form chapter text consumed
//! by [`crate::chapters::ChapterList::parse`].

use crate::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub record: RecordMetadata,
    pub shorts: Option<ShortsMetadata>,
}

/// Full-length recording to publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(default)]
    pub platforms: Vec<String>,
    pub file: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    /// Free-text chapter list, one `HH:MM:SS – description` per line
    pub timecodes: Option<String>,
    pub preview: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Short-form clip to publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortsMetadata {
    #[serde(default)]
    pub platforms: Vec<String>,
    pub file: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub default_tags: Vec<String>,
}

impl Metadata {
    /// Load a metadata document and validate its record entry.
    pub async fn load_record(path: &Path) -> Result<Self> {
        let mut metadata = Self::read(path).await?;
        metadata.validate_record()?;
        Ok(metadata)
    }

    async fn read(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            return Err(SplitError::Metadata(format!(
                "metadata file not found: {}",
                path.display()
            )));
        }
        let text = tokio::fs::read_to_string(path).await?;
        toml::from_str(&text).map_err(|e| SplitError::Metadata(format!("malformed metadata: {e}")))
    }

    /// Check the record's referenced files and fill in a default title.
    fn validate_record(&mut self) -> Result<()> {
        if self.record.file.is_empty() {
            return Err(SplitError::Metadata("metadata file is empty".to_string()));
        }
        if !Path::new(&self.record.file).exists() {
            return Err(SplitError::Metadata(format!(
                "file not found: {}",
                self.record.file
            )));
        }
        if let Some(preview) = &self.record.preview {
            if !Path::new(preview).exists() {
                return Err(SplitError::Metadata(format!(
                    "incorrect preview file: {preview}"
                )));
            }
        }
        if self.record.title.is_empty() {
            let name = Path::new(&self.record.file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown");
            self.record.title = format!("File - {name}");
        }
        Ok(())
    }
}
