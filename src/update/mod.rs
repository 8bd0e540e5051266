//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod navigation;
mod sheet;
mod sync;
mod timer;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::SheetModel;

#[cfg(debug_assertions)]
use crate::tracing::StackSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use navigation::{reconcile, update_navigation, Reconciliation};
pub use sheet::update_sheet;
pub use sync::{sync_url, SyncIntent};
pub use timer::update_timer;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut SheetModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut SheetModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Sheet(m) => sheet::update_sheet(model, m),
        Msg::Nav(m) => navigation::update_navigation(model, m),
        Msg::Timer(m) => timer::update_timer(model, m),
    }
}

/// Update with tracing instrumentation (debug builds only)
#[cfg(debug_assertions)]
fn update_traced(model: &mut SheetModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = StackSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = StackSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "sheets", %diff, "state changed");
    }

    model.assert_invariants_with_context(&msg_name);

    result
}

/// Get a display name for a message type
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Sheet(m) => format!("Sheet::{:?}", m),
        Msg::Nav(m) => format!("Nav::{:?}", m),
        Msg::Timer(m) => format!("Timer::{:?}", m),
    }
}
