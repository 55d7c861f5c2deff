//! Aggregate header record
//!
//! The `<myinfo>` record that precedes the entries. Its counts are derived
//! from the batch, never copied from the input.

use crate::domain::entry::{EntryStatus, KindGroup};
use crate::markup::MarkupNode;
use serde::Serialize;

/// Per-status entry counts of one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Currently consuming
    pub current: usize,
    /// Completed, repeats excluded
    pub completed: usize,
    /// On hold
    pub on_hold: usize,
    /// Dropped
    pub dropped: usize,
    /// Planned, including not-interested
    pub planned: usize,
    /// Repeating; folded into completed by the header
    pub repeating: usize,
}

impl StatusCounts {
    /// Counts one entry; not-interested entries land in the planned bucket
    pub fn record(&mut self, status: EntryStatus) {
        match status {
            EntryStatus::Current => self.current += 1,
            EntryStatus::Completed => self.completed += 1,
            EntryStatus::OnHold => self.on_hold += 1,
            EntryStatus::Dropped => self.dropped += 1,
            EntryStatus::Planned | EntryStatus::NotInterested => self.planned += 1,
            EntryStatus::Repeating => self.repeating += 1,
        }
    }

    /// Completed bucket as the header reports it (repeats included)
    pub fn completed_with_repeats(&self) -> usize {
        self.completed + self.repeating
    }

    /// Sum of all buckets
    pub fn total(&self) -> usize {
        self.current + self.completed + self.on_hold + self.dropped + self.planned + self.repeating
    }
}

impl<'a> FromIterator<&'a EntryStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a EntryStatus>>(iter: I) -> Self {
        let mut counts = Self::default();
        for status in iter {
            counts.record(*status);
        }
        counts
    }
}

/// User identity written into the header, when known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentity {
    /// Numeric user id
    pub user_id: Option<u64>,
    /// Display name
    pub user_name: Option<String>,
}

/// The batch-wide summary record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateHeader {
    group: KindGroup,
    total: usize,
    counts: StatusCounts,
    user: UserIdentity,
}

impl AggregateHeader {
    /// Creates a header for `total` entries of `group`
    pub fn new(group: KindGroup, total: usize, counts: StatusCounts, user: UserIdentity) -> Self {
        Self {
            group,
            total,
            counts,
            user,
        }
    }

    /// Kind-group the header describes
    pub fn group(&self) -> KindGroup {
        self.group
    }

    /// Total entry count
    pub fn total(&self) -> usize {
        self.total
    }

    /// Per-status counts
    pub fn counts(&self) -> &StatusCounts {
        &self.counts
    }

    /// Legacy export type code: 1 for anime, 2 for manga
    pub fn export_type(&self) -> u8 {
        match self.group {
            KindGroup::Video => 1,
            KindGroup::Text => 2,
        }
    }

    /// Builds the `<myinfo>` node
    pub fn to_node(&self) -> MarkupNode {
        let (noun, current, planned) = match self.group {
            KindGroup::Video => ("anime", "watching", "plantowatch"),
            KindGroup::Text => ("manga", "reading", "plantoread"),
        };

        let mut node = MarkupNode::new("myinfo");
        node.add_child(MarkupNode::text(
            "user_id",
            self.user.user_id.map(|id| id.to_string()).unwrap_or_default(),
        ));
        node.add_child(MarkupNode::verbatim(
            "user_name",
            self.user.user_name.clone().unwrap_or_default(),
        ));
        node.add_child(MarkupNode::text("user_export_type", self.export_type().to_string()));
        node.add_child(MarkupNode::text(format!("user_total_{noun}"), self.total.to_string()));
        node.add_child(MarkupNode::text(
            format!("user_total_{current}"),
            self.counts.current.to_string(),
        ));
        node.add_child(MarkupNode::text(
            "user_total_completed",
            self.counts.completed_with_repeats().to_string(),
        ));
        node.add_child(MarkupNode::text("user_total_onhold", self.counts.on_hold.to_string()));
        node.add_child(MarkupNode::text("user_total_dropped", self.counts.dropped.to_string()));
        node.add_child(MarkupNode::text(
            format!("user_total_{planned}"),
            self.counts.planned.to_string(),
        ));
        node
    }
}
