//! Typed legacy records
//!
//! [`AnimeRecord`] and [`MangaRecord`] hold already-mapped legacy values. Their
//! `to_node` methods own the wire contract: the field order, which fields are
//! verbatim blocks, and how absent values are rendered.

use super::mapping::{
    Flag, LegacyPriority, ListStatus, ReplayValue, SeriesType, SnsPolicy, StorageMedium,
};
use crate::domain::entry::KindGroup;
use crate::markup::MarkupNode;
use chrono::NaiveDate;

/// Sentinel written for absent dates
pub const SENTINEL_DATE: &str = "0000-00-00";

/// One `<anime>` record
#[derive(Debug, Clone, PartialEq)]
pub struct AnimeRecord {
    /// MyAnimeList anime id, 0 when unmapped
    pub series_animedb_id: u64,
    /// Preferred title
    pub series_title: String,
    /// Broadcast format
    pub series_type: Option<SeriesType>,
    /// Episode total known upstream
    pub series_episodes: Option<u32>,
    /// Legacy list-entry id, always 0 on export
    pub my_id: u64,
    /// Episodes watched
    pub my_watched_episodes: u32,
    /// Start date
    pub my_start_date: Option<NaiveDate>,
    /// Finish date
    pub my_finish_date: Option<NaiveDate>,
    /// Score on the 0-10 scale
    pub my_score: u8,
    /// List status
    pub my_status: ListStatus,
    /// Storage medium
    pub my_storage: Option<StorageMedium>,
    /// Storage amount
    pub my_storage_value: Option<f64>,
    /// Free-form notes
    pub my_comments: String,
    /// Completed rewatches
    pub my_times_watched: u32,
    /// Rewatch likelihood
    pub my_rewatch_value: Option<ReplayValue>,
    /// Currently rewatching
    pub my_rewatching: bool,
    /// Episode reached in the current rewatch
    pub my_rewatching_ep: u32,
    /// Priority
    pub my_priority: Option<LegacyPriority>,
    /// Tags, joined with commas on the wire
    pub my_tags: Vec<String>,
    /// Create a discussion thread
    pub my_discuss: bool,
    /// Social sharing policy
    pub my_sns: SnsPolicy,
    /// Overwrite an existing entry on import
    pub update_on_import: bool,
}

impl AnimeRecord {
    /// Builds the `<anime>` node in wire order
    pub fn to_node(&self) -> MarkupNode {
        let group = KindGroup::Video;
        let mut node = MarkupNode::new("anime");
        let fields = [
            MarkupNode::text("series_animedb_id", self.series_animedb_id.to_string()),
            MarkupNode::verbatim("series_title", self.series_title.as_str()),
            MarkupNode::text("series_type", label_or_empty(self.series_type.map(SeriesType::label))),
            MarkupNode::text("series_episodes", count_or_empty(self.series_episodes)),
            MarkupNode::text("my_id", self.my_id.to_string()),
            MarkupNode::text("my_watched_episodes", self.my_watched_episodes.to_string()),
            MarkupNode::text("my_start_date", render_date(self.my_start_date)),
            MarkupNode::text("my_finish_date", render_date(self.my_finish_date)),
            MarkupNode::text("my_score", self.my_score.to_string()),
            MarkupNode::text("my_status", self.my_status.label(group)),
            MarkupNode::text("my_rated", ""),
            MarkupNode::text("my_storage", label_or_empty(self.my_storage.map(StorageMedium::label))),
            MarkupNode::text(
                "my_storage_value",
                format!("{:.2}", self.my_storage_value.unwrap_or(0.0)),
            ),
            MarkupNode::verbatim("my_comments", self.my_comments.as_str()),
            MarkupNode::text("my_times_watched", self.my_times_watched.to_string()),
            MarkupNode::text(
                "my_rewatch_value",
                label_or_empty(self.my_rewatch_value.map(ReplayValue::label)),
            ),
            MarkupNode::text("my_rewatching", Flag::Repeating.encode(group, self.my_rewatching)),
            MarkupNode::text("my_rewatching_ep", self.my_rewatching_ep.to_string()),
            MarkupNode::text("my_priority", label_or_empty(self.my_priority.map(LegacyPriority::label))),
            MarkupNode::verbatim("my_tags", self.my_tags.join(",")),
            MarkupNode::text("my_discuss", Flag::Discuss.encode(group, self.my_discuss)),
            MarkupNode::text("my_sns", self.my_sns.label()),
            MarkupNode::text(
                "update_on_import",
                Flag::UpdateOnImport.encode(group, self.update_on_import),
            ),
        ];
        for field in fields {
            node.add_child(field);
        }
        node
    }
}

/// One `<manga>` record
#[derive(Debug, Clone, PartialEq)]
pub struct MangaRecord {
    /// MyAnimeList manga id, 0 when unmapped
    pub manga_mangadb_id: u64,
    /// Preferred title
    pub manga_title: String,
    /// Volume total known upstream
    pub manga_volumes: Option<u32>,
    /// Chapter total known upstream
    pub manga_chapters: Option<u32>,
    /// Legacy list-entry id, always 0 on export
    pub my_id: u64,
    /// Volumes read
    pub my_read_volumes: u32,
    /// Chapters read
    pub my_read_chapters: u32,
    /// Start date
    pub my_start_date: Option<NaiveDate>,
    /// Finish date
    pub my_finish_date: Option<NaiveDate>,
    /// Score on the 0-10 scale
    pub my_score: u8,
    /// List status
    pub my_status: ListStatus,
    /// Scanlation group
    pub my_scanlation_group: String,
    /// Storage medium
    pub my_storage: Option<StorageMedium>,
    /// Retail volumes owned
    pub my_retail_volumes: u32,
    /// Free-form notes
    pub my_comments: String,
    /// Completed rereads
    pub my_times_read: u32,
    /// Reread likelihood
    pub my_reread_value: Option<ReplayValue>,
    /// Currently rereading
    pub my_rereading: bool,
    /// Priority
    pub my_priority: Option<LegacyPriority>,
    /// Tags, joined with commas on the wire
    pub my_tags: Vec<String>,
    /// Create a discussion thread
    pub my_discuss: bool,
    /// Social sharing policy
    pub my_sns: SnsPolicy,
    /// Overwrite an existing entry on import
    pub update_on_import: bool,
}

impl MangaRecord {
    /// Builds the `<manga>` node in wire order
    pub fn to_node(&self) -> MarkupNode {
        let group = KindGroup::Text;
        let mut node = MarkupNode::new("manga");
        let fields = [
            MarkupNode::text("manga_mangadb_id", self.manga_mangadb_id.to_string()),
            MarkupNode::verbatim("manga_title", self.manga_title.as_str()),
            MarkupNode::text("manga_volumes", count_or_empty(self.manga_volumes)),
            MarkupNode::text("manga_chapters", count_or_empty(self.manga_chapters)),
            MarkupNode::text("my_id", self.my_id.to_string()),
            MarkupNode::text("my_read_volumes", self.my_read_volumes.to_string()),
            MarkupNode::text("my_read_chapters", self.my_read_chapters.to_string()),
            MarkupNode::text("my_start_date", render_date(self.my_start_date)),
            MarkupNode::text("my_finish_date", render_date(self.my_finish_date)),
            MarkupNode::text("my_score", self.my_score.to_string()),
            MarkupNode::text("my_status", self.my_status.label(group)),
            MarkupNode::verbatim("my_scanlation_group", self.my_scanlation_group.as_str()),
            MarkupNode::text("my_storage", label_or_empty(self.my_storage.map(StorageMedium::label))),
            MarkupNode::text("my_retail_volumes", self.my_retail_volumes.to_string()),
            MarkupNode::verbatim("my_comments", self.my_comments.as_str()),
            MarkupNode::text("my_times_read", self.my_times_read.to_string()),
            MarkupNode::text(
                "my_reread_value",
                label_or_empty(self.my_reread_value.map(ReplayValue::label)),
            ),
            MarkupNode::text("my_rereading", Flag::Repeating.encode(group, self.my_rereading)),
            MarkupNode::text("my_priority", label_or_empty(self.my_priority.map(LegacyPriority::label))),
            MarkupNode::verbatim("my_tags", self.my_tags.join(",")),
            MarkupNode::text("my_discuss", Flag::Discuss.encode(group, self.my_discuss)),
            MarkupNode::text("my_sns", self.my_sns.label()),
            MarkupNode::text(
                "update_on_import",
                Flag::UpdateOnImport.encode(group, self.update_on_import),
            ),
        ];
        for field in fields {
            node.add_child(field);
        }
        node
    }
}

/// Either kind of legacy record
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyRecord {
    /// Video group
    Anime(AnimeRecord),
    /// Text group
    Manga(MangaRecord),
}

impl LegacyRecord {
    /// Kind-group of the record
    pub fn group(&self) -> KindGroup {
        match self {
            LegacyRecord::Anime(_) => KindGroup::Video,
            LegacyRecord::Manga(_) => KindGroup::Text,
        }
    }

    /// Legacy database id (0 when the entry had no mapping)
    pub fn database_id(&self) -> u64 {
        match self {
            LegacyRecord::Anime(r) => r.series_animedb_id,
            LegacyRecord::Manga(r) => r.manga_mangadb_id,
        }
    }

    /// Builds the record node
    pub fn to_node(&self) -> MarkupNode {
        match self {
            LegacyRecord::Anime(r) => r.to_node(),
            LegacyRecord::Manga(r) => r.to_node(),
        }
    }
}

fn render_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| SENTINEL_DATE.to_string())
}

// Upstream totals of zero mean "unknown" on the wire.
fn count_or_empty(count: Option<u32>) -> String {
    match count {
        Some(n) if n > 0 => n.to_string(),
        _ => String::new(),
    }
}

fn label_or_empty(label: Option<&'static str>) -> &'static str {
    label.unwrap_or("")
}
