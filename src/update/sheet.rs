//! Sheet request handlers (open, close, close-by-kind, clear, restore)

use crate::commands::{with_redraw, Cmd};
use crate::messages::SheetMsg;
use crate::model::{InFlight, Sheet, SheetId, SheetModel};

use super::sync::{sync_url, SyncIntent};

/// Handle sheet requests
///
/// While a traversal is in flight every request is deferred and replayed
/// once the popstate has been reconciled, so requests never interleave
/// with a half-finished back navigation.
pub fn update_sheet(model: &mut SheetModel, msg: SheetMsg) -> Option<Cmd> {
    if model.in_flight.is_some() {
        tracing::debug!("Deferring {:?} until traversal completes", msg);
        model.deferred.push_back(msg);
        return None;
    }

    match msg {
        SheetMsg::Open { kind, props } => {
            let sheet = Sheet::open(kind, props);
            tracing::debug!(target: "sheets", id = %sheet.id, %kind, "open");
            model.stack.push(sheet);
            with_redraw(sync_url(model, SyncIntent::Push))
        }

        SheetMsg::Close(id) => close_sheet(model, id),

        SheetMsg::CloseOfKind(kind) => match model.stack.latest_open_of_kind(kind) {
            Some(id) => close_sheet(model, id),
            None => {
                tracing::debug!("No open {} sheet to close", kind);
                None
            }
        },

        SheetMsg::ClearAll => clear_all(model),

        SheetMsg::Restore(id) => {
            let Some(handle) = model.stack.restore(id) else {
                tracing::debug!("Sheet {} is not closing, nothing to restore", id);
                return None;
            };
            tracing::debug!(target: "sheets", %id, "restore");
            Some(Cmd::batch(vec![
                Cmd::CancelEviction { handle },
                sync_url(model, SyncIntent::Replace).unwrap_or_default(),
                Cmd::Redraw,
            ]))
        }

        SheetMsg::PatchProps { id, props } => {
            if !model.stack.patch_props(id, props) {
                tracing::debug!("Sheet {} is not open, ignoring props patch", id);
                return None;
            }
            with_redraw(sync_url(model, SyncIntent::Replace))
        }
    }
}

fn close_sheet(model: &mut SheetModel, id: SheetId) -> Option<Cmd> {
    match model.stack.get(id) {
        None => {
            tracing::debug!("Close for unknown sheet {}", id);
            return None;
        }
        Some(sheet) if !sheet.is_open() => {
            tracing::debug!("Sheet {} already closing", id);
            return None;
        }
        Some(_) => {}
    }

    if can_close_by_traversal(model, id) {
        tracing::debug!(target: "sheets", %id, "close via back navigation");
        model.in_flight = Some(InFlight::Close(id));
        return Some(Cmd::Back { steps: 1 });
    }

    close_directly(model, &[id])
}

/// Whether going back one entry closes exactly `id` and nothing else
///
/// Requires `id` to be the top open sheet, the URL to be current, and the
/// entry beneath (as recorded in our own marker) to hold exactly the other
/// open sheets. Anything else, including a session whose previous entry
/// is not ours, closes directly instead of risking navigating away.
fn can_close_by_traversal(model: &SheetModel, id: SheetId) -> bool {
    if !model.config.enabled || !model.url_sync.is_in_sync() || model.marker.depth == 0 {
        return false;
    }
    if model.stack.top_open().map(|s| s.id) != Some(id) {
        return false;
    }

    let remaining: Vec<SheetId> = model
        .stack
        .open_ids()
        .into_iter()
        .filter(|open| *open != id)
        .collect();
    model.marker.below.as_deref() == Some(remaining.as_slice())
}

fn clear_all(model: &mut SheetModel) -> Option<Cmd> {
    if model.stack.open_count() == 0 {
        return None;
    }

    let depth = model.marker.depth;
    if model.config.enabled && depth > 0 {
        tracing::debug!(target: "sheets", depth, "clear via back navigation");
        model.in_flight = Some(InFlight::ClearAll);
        return Some(Cmd::Back {
            steps: depth as usize,
        });
    }

    let ids = model.stack.open_ids();
    close_directly(model, &ids)
}

/// Start the exit animation of an open sheet
pub(super) fn begin_closing(model: &mut SheetModel, id: SheetId) -> Option<Cmd> {
    let handle = model.next_task_handle();
    if !model.stack.mark_closing(id, handle) {
        return None;
    }
    tracing::debug!(target: "sheets", %id, handle = handle.0, "closing");
    Some(Cmd::ScheduleEviction {
        id,
        handle,
        delay_ms: model.config.evict_delay_ms,
    })
}

/// Close sheets without touching the back stack: mark them closing and
/// replace the current entry
pub(super) fn close_directly(model: &mut SheetModel, ids: &[SheetId]) -> Option<Cmd> {
    let mut cmds: Vec<Cmd> = ids
        .iter()
        .filter_map(|id| begin_closing(model, *id))
        .collect();
    if cmds.is_empty() {
        return None;
    }

    cmds.push(sync_url(model, SyncIntent::Replace).unwrap_or_default());
    cmds.push(Cmd::Redraw);
    Some(Cmd::batch(cmds))
}

/// Replay requests deferred during a traversal, stopping if one of them
/// starts another traversal
pub(super) fn drain_deferred(model: &mut SheetModel) -> Option<Cmd> {
    let mut cmds = Vec::new();
    while model.in_flight.is_none() {
        let Some(msg) = model.deferred.pop_front() else {
            break;
        };
        if let Some(cmd) = update_sheet(model, msg) {
            cmds.push(cmd);
        }
    }

    if cmds.is_empty() {
        None
    } else {
        Some(Cmd::batch(cmds))
    }
}
