//! Navigation history abstraction
//!
//! The browser's session history is an external log with two writers: the
//! application (push/replace) and the user (back/forward). This module
//! defines the application's view of that log:
//!
//! - `NavigationHistory`: the operations the runtime performs on it
//! - `EntryMarker`: app-written state stamped onto every entry it writes
//! - `PopStateEvent`: what the log reports after a traversal
//! - `MemoryHistory`: an in-process implementation with browser semantics
//! - `location`: helpers for the sheet parameter on a full URL

pub mod location;
mod memory;

use serde::{Deserialize, Serialize};

use crate::model::SheetId;

pub use memory::{HistoryEntry, MemoryHistory, WriteStats};

/// State the application attaches to each history entry it writes
///
/// Entries written by anything else carry no marker and read as depth 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMarker {
    /// In-app pushes between the session's base entry and this one
    pub depth: u32,
    /// Sheet ids encoded in this entry's URL, bottom to top
    pub open: Vec<SheetId>,
    /// Sheet ids encoded in the entry directly beneath, when the app wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<Vec<SheetId>>,
}

impl EntryMarker {
    /// Marker for the entry the session started on
    pub fn base(open: Vec<SheetId>) -> Self {
        Self {
            depth: 0,
            open,
            below: None,
        }
    }

    /// Marker for an entry pushed on top of this one
    pub fn pushed(&self, open: Vec<SheetId>) -> Self {
        Self {
            depth: self.depth + 1,
            open,
            below: Some(self.open.clone()),
        }
    }

    /// Marker for this entry after a replace
    pub fn replaced(&self, open: Vec<SheetId>) -> Self {
        Self {
            depth: self.depth,
            open,
            below: self.below.clone(),
        }
    }
}

/// Delivered after the current entry changed by traversal (back/forward/go)
#[derive(Debug, Clone, PartialEq)]
pub struct PopStateEvent {
    pub url: String,
    pub marker: Option<EntryMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("history API is unavailable")]
    Unavailable,
    #[error("entry state of {size} bytes exceeds quota of {quota} bytes")]
    QuotaExceeded { size: usize, quota: usize },
    #[error("cannot traverse {delta} entries from index {index} of {len}")]
    OutOfRange { delta: isize, index: usize, len: usize },
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
}

/// The operations the runtime performs on the session history
pub trait NavigationHistory {
    /// URL of the current entry
    fn location(&self) -> &str;

    /// Marker of the current entry, if the application wrote one
    fn marker(&self) -> Option<&EntryMarker>;

    /// Add a new entry after the current one, discarding forward entries
    fn push(&mut self, url: &str, marker: EntryMarker) -> Result<(), NavigationError>;

    /// Overwrite the current entry
    fn replace(&mut self, url: &str, marker: EntryMarker) -> Result<(), NavigationError>;

    /// Traverse `delta` entries. Completion is reported later through
    /// [`NavigationHistory::poll_event`], never synchronously.
    fn go(&mut self, delta: isize) -> Result<(), NavigationError>;

    /// Next pending traversal notification
    fn poll_event(&mut self) -> Option<PopStateEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_push_and_replace_chain() {
        let a = SheetId::generate();
        let b = SheetId::generate();

        let base = EntryMarker::base(vec![]);
        let first = base.pushed(vec![a]);
        let second = first.pushed(vec![a, b]);

        assert_eq!(second.depth, 2);
        assert_eq!(second.below, Some(vec![a]));

        let replaced = second.replaced(vec![a]);
        assert_eq!(replaced.depth, 2);
        assert_eq!(replaced.below, Some(vec![a]));
        assert_eq!(replaced.open, vec![a]);
    }
}
