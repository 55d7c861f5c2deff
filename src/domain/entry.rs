//! Canonical list entry model
//!
//! This module defines [`CanonicalEntry`], the service-agnostic representation
//! of one tracked title, together with the enumerations it is built from.
//! Entries are read from save files by [`crate::adapters::savefile`] and are
//! never mutated by the compiler.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Type of media an entry tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Anime and other animation
    Animation,
    /// Manga, manhwa and other comics
    Comic,
    /// Light novels and books
    Book,
    /// Video games
    Game,
    /// Live-action television
    Tv,
    /// Live-action movies
    Movie,
    /// Podcasts
    Podcast,
    /// Anything else
    Other,
}

impl MediaKind {
    /// Returns the kind-group this kind exports as, if any
    pub fn group(self) -> Option<KindGroup> {
        match self {
            MediaKind::Animation => Some(KindGroup::Video),
            MediaKind::Comic | MediaKind::Book => Some(KindGroup::Text),
            MediaKind::Game
            | MediaKind::Tv
            | MediaKind::Movie
            | MediaKind::Podcast
            | MediaKind::Other => None,
        }
    }

    /// Returns the lowercase save-file name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Animation => "animation",
            MediaKind::Comic => "comic",
            MediaKind::Book => "book",
            MediaKind::Game => "game",
            MediaKind::Tv => "tv",
            MediaKind::Movie => "movie",
            MediaKind::Podcast => "podcast",
            MediaKind::Other => "other",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The video/text partition an export batch must be homogeneous within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindGroup {
    /// Exported as `<anime>` records
    Video,
    /// Exported as `<manga>` records
    Text,
}

impl fmt::Display for KindGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindGroup::Video => f.write_str("video"),
            KindGroup::Text => f.write_str("text"),
        }
    }
}

/// Status of the entry on the user's list
///
/// Save files spell statuses per medium (`watching`, `reading`, `rewatching`, ...);
/// all of them collapse onto these seven values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Currently consuming
    #[serde(
        rename = "current",
        alias = "watching",
        alias = "reading",
        alias = "playing",
        alias = "listening"
    )]
    Current,
    /// Finished
    #[serde(
        rename = "completed",
        alias = "watched",
        alias = "read",
        alias = "played",
        alias = "listened"
    )]
    Completed,
    /// Paused
    #[serde(
        rename = "onhold",
        alias = "on_hold",
        alias = "on-hold",
        alias = "paused"
    )]
    OnHold,
    /// Stopped for good
    #[serde(rename = "dropped", alias = "stopped")]
    Dropped,
    /// Not started yet
    #[serde(
        rename = "planned",
        alias = "plan_to_watch",
        alias = "plan_to_read",
        alias = "plan_to_play",
        alias = "plan_to_listen"
    )]
    Planned,
    /// Going through it again
    #[serde(
        rename = "repeat",
        alias = "repeating",
        alias = "rewatching",
        alias = "rereading",
        alias = "replaying",
        alias = "relistening"
    )]
    Repeating,
    /// Explicitly not interested
    #[serde(
        rename = "notinterested",
        alias = "not_interested",
        alias = "not-interested"
    )]
    NotInterested,
}

/// Five-level scale shared by priority and replay likelihood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Very low
    VeryLow,
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
    /// Very high
    VeryHigh,
}

impl Priority {
    /// Folds the outer levels onto the three-level legacy scale
    ///
    /// `VeryLow` becomes `Low` and `VeryHigh` becomes `High`; the result is a
    /// fixed point, so compressing twice equals compressing once.
    pub fn compress(self) -> Self {
        match self {
            Priority::VeryLow => Priority::Low,
            Priority::VeryHigh => Priority::High,
            other => other,
        }
    }
}

/// Identifier of the media on the service the entry came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaIdentifier {
    /// Identifier flavour (`int`, `slug`, `uuid`, ...)
    #[serde(rename = "type", default)]
    pub id_type: String,
    /// Identifier value
    pub value: String,
}

/// Structured title in several renderings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title in the original script
    #[serde(default)]
    pub native: Option<String>,
    /// Title localized to the user's language
    #[serde(default)]
    pub localized: Option<String>,
    /// Romanized title
    #[serde(default)]
    pub transliterated: Option<String>,
    /// Official English title
    #[serde(default)]
    pub english: Option<String>,
}

impl Title {
    /// Picks the rendering exported to MAL XML: transliterated, else native
    pub fn preferred(&self) -> Option<&str> {
        self.transliterated
            .as_deref()
            .or(self.native.as_deref())
    }
}

/// User score on an arbitrary scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Score value
    #[serde(default)]
    pub value: Option<f64>,
    /// Maximum of the scale the value is expressed on (10 when absent)
    #[serde(default)]
    pub maximum: Option<f64>,
}

impl Score {
    /// Reduces the score to an integer on the 0-10 legacy scale
    pub fn to_legacy(&self) -> u8 {
        let Some(value) = self.value.filter(|v| v.is_finite()) else {
            return 0;
        };
        let scaled = match self.maximum {
            Some(max) if max.is_finite() && max > 0.0 && max != 10.0 => value * 10.0 / max,
            _ => value,
        };
        scaled.round().clamp(0.0, 10.0) as u8
    }
}

/// Start and finish dates of the entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDates {
    /// When the user started
    #[serde(default, with = "flexible_date")]
    pub start: Option<NaiveDate>,
    /// When the user finished
    #[serde(default, with = "flexible_date")]
    pub finish: Option<NaiveDate>,
}

/// Progress counters; which ones are meaningful depends on the media kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Episode count (video)
    #[serde(default)]
    pub episode: Option<u32>,
    /// Season count (video)
    #[serde(default)]
    pub season: Option<u32>,
    /// Chapter count (text)
    #[serde(default)]
    pub chapter: Option<u32>,
    /// Volume count (text)
    #[serde(default)]
    pub volume: Option<u32>,
    /// Page count (text)
    #[serde(default)]
    pub page: Option<u32>,
}

impl Progress {
    /// Episodes, 0 when absent
    pub fn episodes(&self) -> u32 {
        self.episode.unwrap_or(0)
    }

    /// Chapters, 0 when absent
    pub fn chapters(&self) -> u32 {
        self.chapter.unwrap_or(0)
    }

    /// Volumes, 0 when absent
    pub fn volumes(&self) -> u32 {
        self.volume.unwrap_or(0)
    }
}

/// User tags, normalized to a list even when the source holds a single string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Tags(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Tags {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(tag) => Self(vec![tag]),
            OneOrMany::Many(tags) => Self(tags),
        }
    }
}

impl Tags {
    /// Creates a tag list
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    /// Returns the tags in order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Joins the tags with commas, the legacy wire form
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<&str> for Tags {
    fn from(tag: &str) -> Self {
        Self(vec![tag.to_string()])
    }
}

impl From<Vec<&str>> for Tags {
    fn from(tags: Vec<&str>) -> Self {
        Self(tags.into_iter().map(String::from).collect())
    }
}

/// Mapping table from service name to the media id on that service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mappings(BTreeMap<String, serde_json::Value>);

impl Mappings {
    /// Adds or replaces a mapping
    pub fn insert(&mut self, service: impl Into<String>, id: impl Into<serde_json::Value>) {
        self.0.insert(service.into(), id.into());
    }

    /// Returns the id for `service` as a string
    ///
    /// Null values and nested objects count as absent.
    pub fn get(&self, service: &str) -> Option<String> {
        match self.0.get(service)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// One user-tracked title in service-agnostic form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEntry {
    /// Media identifier on the source service
    pub id: MediaIdentifier,

    /// Title renderings
    #[serde(default)]
    pub title: Title,

    /// Media kind
    #[serde(rename = "type")]
    pub media_kind: MediaKind,

    /// Media format within the kind (TV, OVA, ...)
    #[serde(default)]
    pub subtype: Option<String>,

    /// List status
    pub status: EntryStatus,

    /// User progress
    #[serde(default)]
    pub progress: Progress,

    /// Totals known upstream
    #[serde(default)]
    pub upstream_progress: Progress,

    /// Start/finish dates
    #[serde(rename = "date", default)]
    pub dates: EntryDates,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Number of completed repeats
    #[serde(default)]
    pub repeat_count: Option<u32>,

    /// User score
    #[serde(default)]
    pub score: Option<Score>,

    /// User tags
    #[serde(default)]
    pub tags: Option<Tags>,

    /// Priority on the five-level scale
    #[serde(default)]
    pub priority: Option<Priority>,

    /// Storage medium as spelled by the source
    #[serde(default)]
    pub storage_medium: Option<String>,

    /// Likelihood of a repeat on the five-level scale
    #[serde(rename = "replaylikelihood", alias = "replay_likelihood", default)]
    pub replay_likelihood: Option<Priority>,

    /// Whether the entry is hidden from other users
    #[serde(default)]
    pub is_private: Option<bool>,

    /// Ids of the same media on other services
    #[serde(default)]
    pub mappings: Mappings,
}

impl CanonicalEntry {
    /// Creates a new builder for constructing a CanonicalEntry
    pub fn builder() -> EntryBuilder {
        EntryBuilder::default()
    }

    /// Kind-group of the entry, `None` for kinds MAL XML cannot carry
    pub fn group(&self) -> Option<KindGroup> {
        self.media_kind.group()
    }
}

/// Builder for constructing CanonicalEntry instances
#[derive(Debug, Default)]
pub struct EntryBuilder {
    id: MediaIdentifier,
    title: Title,
    media_kind: Option<MediaKind>,
    subtype: Option<String>,
    status: Option<EntryStatus>,
    progress: Progress,
    upstream_progress: Progress,
    dates: EntryDates,
    notes: Option<String>,
    repeat_count: Option<u32>,
    score: Option<Score>,
    tags: Option<Tags>,
    priority: Option<Priority>,
    storage_medium: Option<String>,
    replay_likelihood: Option<Priority>,
    is_private: Option<bool>,
    mappings: Mappings,
}

impl EntryBuilder {
    /// Creates a new EntryBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source identifier
    pub fn id(mut self, id_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.id = MediaIdentifier {
            id_type: id_type.into(),
            value: value.into(),
        };
        self
    }

    /// Sets the media kind
    pub fn kind(mut self, kind: MediaKind) -> Self {
        self.media_kind = Some(kind);
        self
    }

    /// Sets the list status
    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the full title
    pub fn title(mut self, title: Title) -> Self {
        self.title = title;
        self
    }

    /// Sets only the transliterated title
    pub fn transliterated_title(mut self, title: impl Into<String>) -> Self {
        self.title.transliterated = Some(title.into());
        self
    }

    /// Sets the subtype
    pub fn subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Sets the user progress
    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the upstream totals
    pub fn upstream_progress(mut self, progress: Progress) -> Self {
        self.upstream_progress = progress;
        self
    }

    /// Sets the start date
    pub fn started(mut self, date: NaiveDate) -> Self {
        self.dates.start = Some(date);
        self
    }

    /// Sets the finish date
    pub fn finished(mut self, date: NaiveDate) -> Self {
        self.dates.finish = Some(date);
        self
    }

    /// Sets the notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the repeat count
    pub fn repeat_count(mut self, count: u32) -> Self {
        self.repeat_count = Some(count);
        self
    }

    /// Sets a score on the 0-10 scale
    pub fn score(mut self, value: f64) -> Self {
        self.score = Some(Score {
            value: Some(value),
            maximum: None,
        });
        self
    }

    /// Sets a score on an arbitrary scale
    pub fn score_out_of(mut self, value: f64, maximum: f64) -> Self {
        self.score = Some(Score {
            value: Some(value),
            maximum: Some(maximum),
        });
        self
    }

    /// Sets the tags
    pub fn tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Sets the priority
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the storage medium
    pub fn storage_medium(mut self, medium: impl Into<String>) -> Self {
        self.storage_medium = Some(medium.into());
        self
    }

    /// Sets the replay likelihood
    pub fn replay_likelihood(mut self, likelihood: Priority) -> Self {
        self.replay_likelihood = Some(likelihood);
        self
    }

    /// Sets the privacy flag
    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = Some(is_private);
        self
    }

    /// Adds a mapping to another service
    pub fn mapping(mut self, service: impl Into<String>, id: impl Into<serde_json::Value>) -> Self {
        self.mappings.insert(service, id);
        self
    }

    /// Builds the CanonicalEntry
    ///
    /// # Errors
    ///
    /// Returns an error if the kind or status is missing
    pub fn build(self) -> Result<CanonicalEntry, String> {
        Ok(CanonicalEntry {
            id: self.id,
            title: self.title,
            media_kind: self.media_kind.ok_or("kind is required")?,
            subtype: self.subtype,
            status: self.status.ok_or("status is required")?,
            progress: self.progress,
            upstream_progress: self.upstream_progress,
            dates: self.dates,
            notes: self.notes,
            repeat_count: self.repeat_count,
            score: self.score,
            tags: self.tags,
            priority: self.priority,
            storage_medium: self.storage_medium,
            replay_likelihood: self.replay_likelihood,
            is_private: self.is_private,
            mappings: self.mappings,
        })
    }
}

/// Dates that may arrive as `YYYY-MM-DD` or as a full timestamp
mod flexible_date {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
        }
    }

    pub(super) fn parse(s: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(s) {
            return Some(ts.date_naive());
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|ts| ts.date())
    }
}
