//! Canonical ↔ legacy vocabulary mapping
//!
//! Every legacy vocabulary is a closed enum with a single label table. The
//! canonical→legacy direction is total; parsing a legacy string goes through
//! the same table and fails with [`CompileError::ValueMapping`] for anything
//! the table does not list.
//!
//! The mapper never guesses. Folding the five-level priority scale onto the
//! three legacy levels is the compiler's job ([`Priority::compress`]); an
//! uncompressed level handed to [`LegacyPriority::try_from`] is rejected.

use crate::domain::entry::{EntryStatus, KindGroup, Priority};
use crate::domain::errors::CompileError;
use crate::domain::result::CompileResult;
use std::str::FromStr;

/// Legacy list status (five states)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStatus {
    /// Watching / Reading
    Current,
    /// Completed
    Completed,
    /// On-Hold
    OnHold,
    /// Dropped
    Dropped,
    /// Plan to Watch / Plan to Read
    Planned,
}

impl ListStatus {
    /// All legacy statuses in wire order
    pub const ALL: [ListStatus; 5] = [
        ListStatus::Current,
        ListStatus::Completed,
        ListStatus::OnHold,
        ListStatus::Dropped,
        ListStatus::Planned,
    ];

    /// Maps a canonical status onto the legacy vocabulary
    ///
    /// Repeating collapses onto completed; not-interested has no legacy state
    /// and is exported as planned.
    pub fn from_entry(status: EntryStatus) -> Self {
        match status {
            EntryStatus::Current => ListStatus::Current,
            EntryStatus::Completed | EntryStatus::Repeating => ListStatus::Completed,
            EntryStatus::OnHold => ListStatus::OnHold,
            EntryStatus::Dropped => ListStatus::Dropped,
            EntryStatus::Planned | EntryStatus::NotInterested => ListStatus::Planned,
        }
    }

    /// Wire label for the given kind-group
    pub fn label(self, group: KindGroup) -> &'static str {
        match (self, group) {
            (ListStatus::Current, KindGroup::Video) => "Watching",
            (ListStatus::Current, KindGroup::Text) => "Reading",
            (ListStatus::Completed, _) => "Completed",
            (ListStatus::OnHold, _) => "On-Hold",
            (ListStatus::Dropped, _) => "Dropped",
            (ListStatus::Planned, KindGroup::Video) => "Plan to Watch",
            (ListStatus::Planned, KindGroup::Text) => "Plan to Read",
        }
    }

    /// Parses a wire label of the given kind-group
    pub fn parse(group: KindGroup, label: &str) -> CompileResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label(group).eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| CompileError::value_mapping("my_status", label))
    }
}

/// Legacy priority (three levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyPriority {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl LegacyPriority {
    /// All legacy priorities
    pub const ALL: [LegacyPriority; 3] =
        [LegacyPriority::Low, LegacyPriority::Medium, LegacyPriority::High];

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            LegacyPriority::Low => "Low",
            LegacyPriority::Medium => "Medium",
            LegacyPriority::High => "High",
        }
    }
}

impl TryFrom<Priority> for LegacyPriority {
    type Error = CompileError;

    fn try_from(priority: Priority) -> CompileResult<Self> {
        match priority {
            Priority::Low => Ok(LegacyPriority::Low),
            Priority::Medium => Ok(LegacyPriority::Medium),
            Priority::High => Ok(LegacyPriority::High),
            Priority::VeryLow => Err(CompileError::value_mapping("my_priority", "very_low")),
            Priority::VeryHigh => Err(CompileError::value_mapping("my_priority", "very_high")),
        }
    }
}

impl FromStr for LegacyPriority {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CompileError::value_mapping("my_priority", s))
    }
}

/// Legacy rewatch/reread value (five levels, passed through unchanged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplayValue {
    /// Very Low
    VeryLow,
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
    /// Very High
    VeryHigh,
}

impl ReplayValue {
    /// All replay values
    pub const ALL: [ReplayValue; 5] = [
        ReplayValue::VeryLow,
        ReplayValue::Low,
        ReplayValue::Medium,
        ReplayValue::High,
        ReplayValue::VeryHigh,
    ];

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            ReplayValue::VeryLow => "Very Low",
            ReplayValue::Low => "Low",
            ReplayValue::Medium => "Medium",
            ReplayValue::High => "High",
            ReplayValue::VeryHigh => "Very High",
        }
    }
}

impl From<Priority> for ReplayValue {
    fn from(likelihood: Priority) -> Self {
        match likelihood {
            Priority::VeryLow => ReplayValue::VeryLow,
            Priority::Low => ReplayValue::Low,
            Priority::Medium => ReplayValue::Medium,
            Priority::High => ReplayValue::High,
            Priority::VeryHigh => ReplayValue::VeryHigh,
        }
    }
}

impl FromStr for ReplayValue {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CompileError::value_mapping("replay_value", s))
    }
}

/// Legacy "post to social networks" policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnsPolicy {
    /// Follow the account default
    Default,
    /// Post without confirmation
    Allow,
    /// Post with confirmation
    AskEveryTime,
    /// Never post
    Disallow,
}

impl SnsPolicy {
    /// All policies
    pub const ALL: [SnsPolicy; 4] = [
        SnsPolicy::Default,
        SnsPolicy::Allow,
        SnsPolicy::AskEveryTime,
        SnsPolicy::Disallow,
    ];

    /// Private entries never post; everything else follows the default
    pub fn from_privacy(is_private: Option<bool>) -> Self {
        if is_private.unwrap_or(false) {
            SnsPolicy::Disallow
        } else {
            SnsPolicy::Default
        }
    }

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            SnsPolicy::Default => "default",
            SnsPolicy::Allow => "allow",
            SnsPolicy::AskEveryTime => "ask_every_time",
            SnsPolicy::Disallow => "disallow",
        }
    }
}

impl FromStr for SnsPolicy {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == s.trim())
            .ok_or_else(|| CompileError::value_mapping("my_sns", s))
    }
}

/// Legacy anime series type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesType {
    /// TV series
    Tv,
    /// Original video animation
    Ova,
    /// Movie
    Movie,
    /// Special
    Special,
    /// Original net animation
    Ona,
    /// Music video
    Music,
    /// Commercial
    Cm,
    /// Promotional video
    Pv,
    /// TV special
    TvSpecial,
}

impl SeriesType {
    /// All series types
    pub const ALL: [SeriesType; 9] = [
        SeriesType::Tv,
        SeriesType::Ova,
        SeriesType::Movie,
        SeriesType::Special,
        SeriesType::Ona,
        SeriesType::Music,
        SeriesType::Cm,
        SeriesType::Pv,
        SeriesType::TvSpecial,
    ];

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            SeriesType::Tv => "TV",
            SeriesType::Ova => "OVA",
            SeriesType::Movie => "Movie",
            SeriesType::Special => "Special",
            SeriesType::Ona => "ONA",
            SeriesType::Music => "Music",
            SeriesType::Cm => "CM",
            SeriesType::Pv => "PV",
            SeriesType::TvSpecial => "TV Special",
        }
    }
}

impl FromStr for SeriesType {
    type Err = CompileError;

    /// Accepts wire labels and the canonical subtype spellings (`tv_short`, `tv-special`, ...)
    fn from_str(s: &str) -> CompileResult<Self> {
        let key = normalize_key(s);
        if key == "tvshort" {
            return Ok(SeriesType::Tv);
        }
        Self::ALL
            .into_iter()
            .find(|t| normalize_key(t.label()) == key)
            .ok_or_else(|| CompileError::value_mapping("subtype", s))
    }
}

/// Storage media available for video entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoStorage {
    /// Hard Drive
    HardDrive,
    /// External HD
    ExternalHd,
    /// NAS
    Nas,
    /// Blu-ray
    BluRay,
    /// DVD / CD
    DvdCd,
    /// Retail DVD
    RetailDvd,
    /// VHS
    Vhs,
}

impl VideoStorage {
    /// All video storage media
    pub const ALL: [VideoStorage; 7] = [
        VideoStorage::HardDrive,
        VideoStorage::ExternalHd,
        VideoStorage::Nas,
        VideoStorage::BluRay,
        VideoStorage::DvdCd,
        VideoStorage::RetailDvd,
        VideoStorage::Vhs,
    ];

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            VideoStorage::HardDrive => "Hard Drive",
            VideoStorage::ExternalHd => "External HD",
            VideoStorage::Nas => "NAS",
            VideoStorage::BluRay => "Blu-ray",
            VideoStorage::DvdCd => "DVD / CD",
            VideoStorage::RetailDvd => "Retail DVD",
            VideoStorage::Vhs => "VHS",
        }
    }
}

/// Storage media available for text entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStorage {
    /// Hard Drive
    HardDrive,
    /// External HD
    ExternalHd,
    /// NAS
    Nas,
    /// Blu-ray
    BluRay,
    /// DVD / CD
    DvdCd,
    /// Retail Manga
    RetailManga,
    /// Magazine
    Magazine,
}

impl TextStorage {
    /// All text storage media
    pub const ALL: [TextStorage; 7] = [
        TextStorage::HardDrive,
        TextStorage::ExternalHd,
        TextStorage::Nas,
        TextStorage::BluRay,
        TextStorage::DvdCd,
        TextStorage::RetailManga,
        TextStorage::Magazine,
    ];

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            TextStorage::HardDrive => "Hard Drive",
            TextStorage::ExternalHd => "External HD",
            TextStorage::Nas => "NAS",
            TextStorage::BluRay => "Blu-ray",
            TextStorage::DvdCd => "DVD / CD",
            TextStorage::RetailManga => "Retail Manga",
            TextStorage::Magazine => "Magazine",
        }
    }
}

/// A storage medium resolved within one kind-group's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageMedium {
    /// Video vocabulary
    Video(VideoStorage),
    /// Text vocabulary
    Text(TextStorage),
}

impl StorageMedium {
    /// Resolves a free-form storage medium against `group`'s vocabulary
    ///
    /// Matching ignores case, spacing and punctuation (`hard_drive`,
    /// `Hard Drive` and `HARD-DRIVE` are the same medium).
    ///
    /// # Errors
    ///
    /// - [`CompileError::StorageMediumKindMismatch`] when the value belongs to
    ///   the other group's vocabulary only
    /// - [`CompileError::ValueMapping`] when neither vocabulary knows it
    pub fn resolve(group: KindGroup, value: &str) -> CompileResult<Self> {
        let key = normalize_key(value);
        let video = VideoStorage::ALL
            .into_iter()
            .find(|m| normalize_key(m.label()) == key);
        let text = TextStorage::ALL
            .into_iter()
            .find(|m| normalize_key(m.label()) == key);

        match (group, video, text) {
            (KindGroup::Video, Some(m), _) => Ok(StorageMedium::Video(m)),
            (KindGroup::Text, _, Some(m)) => Ok(StorageMedium::Text(m)),
            (_, None, None) => Err(CompileError::value_mapping("storage_medium", value)),
            (expected, _, _) => Err(CompileError::StorageMediumKindMismatch {
                value: value.to_string(),
                expected,
            }),
        }
    }

    /// Wire label
    pub fn label(self) -> &'static str {
        match self {
            StorageMedium::Video(m) => m.label(),
            StorageMedium::Text(m) => m.label(),
        }
    }

    /// Kind-group whose vocabulary this medium belongs to
    pub fn group(self) -> KindGroup {
        match self {
            StorageMedium::Video(_) => KindGroup::Video,
            StorageMedium::Text(_) => KindGroup::Text,
        }
    }
}

/// Boolean fields of a legacy record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// `my_rewatching` / `my_rereading`
    Repeating,
    /// `my_discuss`
    Discuss,
    /// `update_on_import`
    UpdateOnImport,
}

/// How a boolean is spelled on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSpelling {
    /// `1` / `0`
    Digit,
    /// `YES` / `NO`
    YesNo,
}

impl FlagSpelling {
    /// Spelling of `value`
    pub fn encode(self, value: bool) -> &'static str {
        match (self, value) {
            (FlagSpelling::Digit, true) => "1",
            (FlagSpelling::Digit, false) => "0",
            (FlagSpelling::YesNo, true) => "YES",
            (FlagSpelling::YesNo, false) => "NO",
        }
    }

    /// Parses a spelled boolean
    pub fn decode(self, field: &'static str, raw: &str) -> CompileResult<bool> {
        match (self, raw.trim()) {
            (FlagSpelling::Digit, "1") | (FlagSpelling::YesNo, "YES") => Ok(true),
            (FlagSpelling::Digit, "0") | (FlagSpelling::YesNo, "NO") => Ok(false),
            _ => Err(CompileError::value_mapping(field, raw)),
        }
    }
}

impl Flag {
    /// Per-field, per-kind spelling table
    ///
    /// The text group spells its repeat and discuss flags `YES`/`NO`; every
    /// other combination uses digits.
    pub fn spelling(self, group: KindGroup) -> FlagSpelling {
        match (self, group) {
            (Flag::Repeating, KindGroup::Text) | (Flag::Discuss, KindGroup::Text) => {
                FlagSpelling::YesNo
            }
            (Flag::Repeating, KindGroup::Video)
            | (Flag::Discuss, KindGroup::Video)
            | (Flag::UpdateOnImport, _) => FlagSpelling::Digit,
        }
    }

    /// Encodes `value` for this field in `group`
    pub fn encode(self, group: KindGroup, value: bool) -> &'static str {
        self.spelling(group).encode(value)
    }

    /// Decodes this field's wire value in `group`
    pub fn decode(self, group: KindGroup, raw: &str) -> CompileResult<bool> {
        let field = match self {
            Flag::Repeating => "repeating",
            Flag::Discuss => "my_discuss",
            Flag::UpdateOnImport => "update_on_import",
        };
        self.spelling(group).decode(field, raw)
    }
}

/// Lowercases and drops everything but letters and digits
fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
