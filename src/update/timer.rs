//! Timer handlers (eviction of closed sheets)

use crate::commands::{with_redraw, Cmd};
use crate::messages::TimerMsg;
use crate::model::SheetModel;

use super::sync::{sync_url, SyncIntent};

/// Handle timer deadlines
pub fn update_timer(model: &mut SheetModel, msg: TimerMsg) -> Option<Cmd> {
    match msg {
        TimerMsg::EvictionDue { id, handle } => {
            if !model.stack.evict(id, handle) {
                tracing::debug!(
                    "Skipping stale eviction for sheet {} (handle {})",
                    id,
                    handle.0
                );
                return None;
            }
            tracing::debug!(target: "sheets", %id, "evicted");
            // The pending popstate rewrites location; writing now would land on the wrong entry
            if model.in_flight.is_some() {
                return Some(Cmd::Redraw);
            }
            with_redraw(sync_url(model, SyncIntent::Replace))
        }
    }
}
