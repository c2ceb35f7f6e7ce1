#![forbid(unsafe_code)]

//! Transcript model: the ordered log of what was appended to the stream.
//!
//! Only the kind of each entry is kept; the HTML lives in the page.

use crate::prompt::PromptId;
use crate::scroll::{FollowDecision, FollowPolicy, ScrollMetrics};

/// CSS class of a plain transcript entry.
pub const ENTRY_CLASS: &str = "stream-entry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Notice,
    Prompt(PromptId),
    Disconnected,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<EntryKind>,
    follow: FollowPolicy,
}

impl Transcript {
    #[must_use]
    pub fn new(follow: FollowPolicy) -> Self {
        Self {
            entries: Vec::new(),
            follow,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[EntryKind] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&EntryKind> {
        self.entries.last()
    }

    pub fn push(&mut self, kind: EntryKind) {
        self.entries.push(kind);
    }

    /// Whether an append measured at `before_append` should follow the bottom.
    #[must_use]
    pub fn follow_decision(&self, before_append: ScrollMetrics) -> FollowDecision {
        self.follow.decide(before_append)
    }
}
