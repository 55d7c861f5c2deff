//! Canonical entry → legacy record compilation
//!
//! [`EntryCompiler`] turns one [`CanonicalEntry`] into a [`LegacyRecord`]. It
//! reads the entry without mutating it; every absent field has a defined
//! fallback, so the only failures are kinds outside the video/text groups and
//! enumerated values the legacy vocabularies cannot represent.

use super::mapping::{
    LegacyPriority, ListStatus, ReplayValue, SeriesType, SnsPolicy, StorageMedium,
};
use super::record::{AnimeRecord, LegacyRecord, MangaRecord};
use crate::domain::entry::{CanonicalEntry, EntryStatus, KindGroup, Priority};
use crate::domain::errors::CompileError;
use crate::domain::result::CompileResult;
use crate::markup::MarkupNode;
use serde::{Deserialize, Serialize};

/// Service name whose mapping supplies the legacy database id
pub const MAL_SERVICE: &str = "myanimelist";

/// What to do with entries that have no legacy database id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Emit the record with id 0
    #[default]
    Keep,
    /// Emit the record as a comment so importers skip it
    Comment,
}

impl std::str::FromStr for UnmappedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(UnmappedPolicy::Keep),
            "comment" => Ok(UnmappedPolicy::Comment),
            other => Err(format!(
                "Invalid unmapped entry policy '{other}'. Must be one of: keep, comment"
            )),
        }
    }
}

/// Options applied to every record of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Value of every record's `update_on_import` flag
    pub update_on_import: bool,
    /// Handling of entries without a legacy database id
    pub unmapped: UnmappedPolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            update_on_import: true,
            unmapped: UnmappedPolicy::Keep,
        }
    }
}

/// Compiles canonical entries into legacy records
#[derive(Debug, Clone, Default)]
pub struct EntryCompiler {
    options: CompileOptions,
}

impl EntryCompiler {
    /// Creates a compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles one entry
    ///
    /// # Errors
    ///
    /// - [`CompileError::UnsupportedKind`] for kinds outside the video/text groups
    /// - [`CompileError::ValueMapping`] for subtypes, storage media or ids with
    ///   no legacy equivalent
    /// - [`CompileError::StorageMediumKindMismatch`] for a storage medium from
    ///   the other group's vocabulary
    pub fn compile(&self, entry: &CanonicalEntry) -> CompileResult<LegacyRecord> {
        let group = entry.group().ok_or(CompileError::UnsupportedKind {
            kind: entry.media_kind,
        })?;

        let record = match group {
            KindGroup::Video => LegacyRecord::Anime(self.compile_anime(entry)?),
            KindGroup::Text => LegacyRecord::Manga(self.compile_manga(entry)?),
        };

        tracing::trace!(
            group = %group,
            source_id = %entry.id.value,
            database_id = record.database_id(),
            "Compiled entry"
        );

        Ok(record)
    }

    /// Builds the node for a compiled record, applying the unmapped-entry policy
    pub fn render(&self, record: &LegacyRecord) -> MarkupNode {
        let node = record.to_node();
        if record.database_id() == 0 && self.options.unmapped == UnmappedPolicy::Comment {
            node.into_comment()
        } else {
            node
        }
    }

    fn compile_anime(&self, entry: &CanonicalEntry) -> CompileResult<AnimeRecord> {
        let group = KindGroup::Video;
        Ok(AnimeRecord {
            series_animedb_id: database_id(entry)?,
            series_title: title(entry),
            series_type: entry
                .subtype
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::parse::<SeriesType>)
                .transpose()?,
            series_episodes: entry.upstream_progress.episode,
            my_id: 0,
            my_watched_episodes: entry.progress.episodes(),
            my_start_date: entry.dates.start,
            my_finish_date: entry.dates.finish,
            my_score: score(entry),
            my_status: ListStatus::from_entry(entry.status),
            my_storage: storage(entry, group)?,
            my_storage_value: None,
            my_comments: entry.notes.clone().unwrap_or_default(),
            my_times_watched: entry.repeat_count.unwrap_or(0),
            my_rewatch_value: entry.replay_likelihood.map(ReplayValue::from),
            my_rewatching: entry.status == EntryStatus::Repeating,
            my_rewatching_ep: 0,
            my_priority: Some(priority(entry)?),
            my_tags: tags(entry),
            my_discuss: false,
            my_sns: SnsPolicy::from_privacy(entry.is_private),
            update_on_import: self.options.update_on_import,
        })
    }

    fn compile_manga(&self, entry: &CanonicalEntry) -> CompileResult<MangaRecord> {
        let group = KindGroup::Text;
        Ok(MangaRecord {
            manga_mangadb_id: database_id(entry)?,
            manga_title: title(entry),
            manga_volumes: entry.upstream_progress.volume,
            manga_chapters: entry.upstream_progress.chapter,
            my_id: 0,
            my_read_volumes: entry.progress.volumes(),
            my_read_chapters: entry.progress.chapters(),
            my_start_date: entry.dates.start,
            my_finish_date: entry.dates.finish,
            my_score: score(entry),
            my_status: ListStatus::from_entry(entry.status),
            my_scanlation_group: String::new(),
            my_storage: storage(entry, group)?,
            my_retail_volumes: 0,
            my_comments: entry.notes.clone().unwrap_or_default(),
            my_times_read: entry.repeat_count.unwrap_or(0),
            my_reread_value: entry.replay_likelihood.map(ReplayValue::from),
            my_rereading: entry.status == EntryStatus::Repeating,
            my_priority: Some(priority(entry)?),
            my_tags: tags(entry),
            my_discuss: false,
            my_sns: SnsPolicy::from_privacy(entry.is_private),
            update_on_import: self.options.update_on_import,
        })
    }
}

fn database_id(entry: &CanonicalEntry) -> CompileResult<u64> {
    match entry.mappings.get(MAL_SERVICE) {
        None => Ok(0),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| CompileError::value_mapping(MAL_SERVICE, raw)),
    }
}

fn title(entry: &CanonicalEntry) -> String {
    entry.title.preferred().unwrap_or_default().to_string()
}

fn score(entry: &CanonicalEntry) -> u8 {
    entry.score.map(|s| s.to_legacy()).unwrap_or(0)
}

fn tags(entry: &CanonicalEntry) -> Vec<String> {
    entry
        .tags
        .as_ref()
        .map(|t| t.as_slice().to_vec())
        .unwrap_or_default()
}

// Absent priority exports as low.
fn priority(entry: &CanonicalEntry) -> CompileResult<LegacyPriority> {
    LegacyPriority::try_from(entry.priority.unwrap_or(Priority::Low).compress())
}

fn storage(entry: &CanonicalEntry, group: KindGroup) -> CompileResult<Option<StorageMedium>> {
    entry
        .storage_medium
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| StorageMedium::resolve(group, s))
        .transpose()
}
