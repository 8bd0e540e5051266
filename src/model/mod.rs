//! Model types for the Elm-style architecture
//!
//! `SheetModel` is the single source of truth for sheet state. It is
//! constructed once at the application root and only changed by `update()`.

pub mod sheet;
pub mod stack;

use std::collections::VecDeque;

pub use sheet::{Action, Entity, Phase, Props, Sheet, SheetId, SheetKind};
pub use stack::SheetStack;

use crate::config::SheetConfig;
use crate::history::EntryMarker;
use crate::messages::SheetMsg;
use crate::timer::TaskHandle;

/// Why the URL no longer reflects the open subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Persistence is turned off in config
    Disabled,
    /// The encoded URL would exceed `max_url_length`
    TooLong { length: usize },
    /// The URL could not be rebuilt from the current location
    InvalidLocation,
    /// The history API rejected a push or replace
    NavigationFailed,
}

/// Whether the current URL encodes exactly the open subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlSync {
    #[default]
    InSync,
    Suppressed(Suppression),
}

impl UrlSync {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, UrlSync::InSync)
    }
}

/// A traversal the model requested and is waiting to see reported back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InFlight {
    /// Back one entry to close this sheet
    Close(SheetId),
    /// Back to the session's base entry, then close whatever is left
    ClearAll,
}

/// Sheet state, history bookkeeping and config
#[derive(Debug, Clone)]
pub struct SheetModel {
    pub stack: SheetStack,
    pub config: SheetConfig,
    /// URL of the current history entry, as last written or reported
    pub location: String,
    /// Marker of the current history entry
    pub marker: EntryMarker,
    pub url_sync: UrlSync,
    /// Traversal requested but not yet reported by a popstate
    pub in_flight: Option<InFlight>,
    /// Requests that arrived while a traversal was in flight, replayed in order
    pub deferred: VecDeque<SheetMsg>,
    /// Whether the initial URL has been adopted
    pub mounted: bool,
    next_task: u64,
}

impl SheetModel {
    pub fn new(config: SheetConfig, location: impl Into<String>) -> Self {
        Self {
            stack: SheetStack::new(),
            config,
            location: location.into(),
            marker: EntryMarker::default(),
            url_sync: UrlSync::InSync,
            in_flight: None,
            deferred: VecDeque::new(),
            mounted: false,
            next_task: 0,
        }
    }

    /// Allocate a fresh handle for a delayed task
    pub fn next_task_handle(&mut self) -> TaskHandle {
        self.next_task += 1;
        TaskHandle(self.next_task)
    }

    /// URL to hand out for sharing, withheld while it is stale
    pub fn shareable_url(&self) -> Option<&str> {
        if self.url_sync.is_in_sync() {
            Some(&self.location)
        } else {
            None
        }
    }

    /// Check stack and URL consistency after an update (debug builds only)
    ///
    /// While the URL is in sync and no traversal is pending, the open subset
    /// must be exactly what the current URL decodes to, in the same order.
    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str) {
        let ids: Vec<SheetId> = self.stack.iter().map(|s| s.id).collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        debug_assert_eq!(
            unique.len(),
            ids.len(),
            "Sheet ids must be unique (after {})",
            context
        );

        let settled = self.mounted
            && self.config.enabled
            && self.in_flight.is_none()
            && self.url_sync.is_in_sync();
        if settled {
            let decoded: Vec<SheetId> = crate::codec::decode_url(&self.location, &self.config)
                .into_iter()
                .map(|r| r.id)
                .collect();
            let open = self.stack.open_ids();
            debug_assert_eq!(
                decoded, open,
                "URL must encode exactly the open sheets (after {})",
                context
            );
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants_with_context(&self, _context: &str) {}
}
