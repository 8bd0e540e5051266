//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::history::{EntryMarker, PopStateEvent};
use crate::model::{Props, SheetId, SheetKind};
use crate::timer::TaskHandle;

/// Requests from the rest of the application
#[derive(Debug, Clone, PartialEq)]
pub enum SheetMsg {
    /// Open a new sheet on top of the stack
    Open { kind: SheetKind, props: Props },
    /// Close one sheet (no-op if absent or already closing)
    Close(SheetId),
    /// Close the most recently opened open sheet of a kind
    CloseOfKind(SheetKind),
    /// Close every open sheet
    ClearAll,
    /// Bring a closing sheet back before it is evicted
    Restore(SheetId),
    /// Merge props into an open sheet
    PatchProps { id: SheetId, props: Props },
}

/// Reports from the navigation history
#[derive(Debug, Clone, PartialEq)]
pub enum NavMsg {
    /// First look at the URL the app was loaded with
    Mounted {
        url: String,
        marker: Option<EntryMarker>,
    },
    /// The current entry changed by back/forward traversal
    PopState {
        url: String,
        marker: Option<EntryMarker>,
    },
    /// A push or replace was rejected; carries the entry that is still current
    WriteFailed {
        url: String,
        marker: Option<EntryMarker>,
    },
    /// A requested traversal was rejected and no popstate will follow
    TraversalFailed,
}

/// Delayed task deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMsg {
    /// Exit animation finished for a closing sheet
    EvictionDue { id: SheetId, handle: TaskHandle },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Sheet requests (open, close, restore)
    Sheet(SheetMsg),
    /// History reports (mount, popstate, failures)
    Nav(NavMsg),
    /// Timer deadlines
    Timer(TimerMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn open(kind: SheetKind, props: Props) -> Self {
        Msg::Sheet(SheetMsg::Open { kind, props })
    }

    pub fn close(id: SheetId) -> Self {
        Msg::Sheet(SheetMsg::Close(id))
    }
}

impl From<PopStateEvent> for Msg {
    fn from(event: PopStateEvent) -> Self {
        Msg::Nav(NavMsg::PopState {
            url: event.url,
            marker: event.marker,
        })
    }
}
