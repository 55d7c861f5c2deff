//! Canonical save file reader
//!
//! A save file is a `{ header, data }` document holding canonical entries,
//! stored as JSON or YAML. The reader only parses; it never validates batch
//! homogeneity, which is the exporter's job.

use crate::core::export::UserIdentity;
use crate::domain::entry::{CanonicalEntry, KindGroup};
use crate::domain::{MalxportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// On-disk encoding of a save file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFileFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl SaveFileFormat {
    /// Picks the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing or unknown extensions
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(SaveFileFormat::Json),
            Some("yaml") | Some("yml") => Ok(SaveFileFormat::Yaml),
            other => Err(MalxportError::Validation(format!(
                "Unsupported save file extension '{}' for {}; expected .json, .yaml or .yml",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

/// A parsed save file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Free-form header (version, service and user details, ...)
    #[serde(default)]
    pub header: Value,

    /// Entries in file order
    #[serde(default)]
    pub data: Vec<CanonicalEntry>,
}

/// Entries of a save file partitioned by kind-group
#[derive(Debug, Clone, Default)]
pub struct GroupedEntries {
    /// Animation entries
    pub video: Vec<CanonicalEntry>,
    /// Comic and book entries
    pub text: Vec<CanonicalEntry>,
    /// Entries of kinds MAL XML cannot carry
    pub unsupported: Vec<CanonicalEntry>,
}

impl GroupedEntries {
    /// Entries of one group
    pub fn group(&self, group: KindGroup) -> &[CanonicalEntry] {
        match group {
            KindGroup::Video => &self.video,
            KindGroup::Text => &self.text,
        }
    }
}

impl SaveFile {
    /// Parses save file text
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the text does not match the schema
    pub fn parse(text: &str, format: SaveFileFormat) -> Result<Self> {
        let file = match format {
            SaveFileFormat::Json => serde_json::from_str(text)?,
            SaveFileFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(file)
    }

    /// Reads and parses a save file, picking the format from its extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SaveFileFormat::from_path(path)?;

        if !path.exists() {
            return Err(MalxportError::Io(format!(
                "Save file not found: {}",
                path.display()
            )));
        }

        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            MalxportError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file = Self::parse(&text, format)?;
        tracing::debug!(
            path = %path.display(),
            entries = file.data.len(),
            "Loaded save file"
        );
        Ok(file)
    }

    /// Partitions the entries by kind-group, keeping file order within each group
    pub fn split_by_group(&self) -> GroupedEntries {
        let mut grouped = GroupedEntries::default();
        for entry in &self.data {
            match entry.group() {
                Some(KindGroup::Video) => grouped.video.push(entry.clone()),
                Some(KindGroup::Text) => grouped.text.push(entry.clone()),
                None => grouped.unsupported.push(entry.clone()),
            }
        }
        grouped
    }

    /// User identity recorded in `header.user_details`, if any
    ///
    /// Accepts `id`/`user_id` (number or numeric string) and
    /// `name`/`username`/`user_name`.
    pub fn user_identity(&self) -> UserIdentity {
        let Some(details) = self.header.get("user_details") else {
            return UserIdentity::default();
        };

        let user_id = ["id", "user_id"]
            .iter()
            .filter_map(|key| details.get(*key))
            .find_map(|v| match v {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            });

        let user_name = ["name", "username", "user_name"]
            .iter()
            .filter_map(|key| details.get(*key))
            .find_map(|v| v.as_str().map(str::to_string));

        UserIdentity { user_id, user_name }
    }
}
