//! History report handlers (mount, popstate, write failures)
//!
//! Back/forward traversal is reconciled by a single reducer: `reconcile()`
//! plans the minimal set of transitions that makes the open subset equal
//! the decoded URL, and `apply()` performs them. Feeding the same popstate
//! twice plans nothing the second time.

use std::collections::HashSet;

use crate::codec::{self, SheetRecord};
use crate::commands::{with_redraw, Cmd};
use crate::history::EntryMarker;
use crate::messages::NavMsg;
use crate::model::{InFlight, Sheet, SheetId, SheetModel, SheetStack, Suppression, UrlSync};

use super::sheet::{begin_closing, close_directly, drain_deferred};

/// Transitions that bring the stack in line with a decoded URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Open sheets missing from the URL: start closing
    pub close: Vec<SheetId>,
    /// Closing sheets present in the URL: back to open
    pub restore: Vec<SheetId>,
    /// Sheets in the URL the stack has never seen (or already evicted)
    pub insert: Vec<SheetRecord>,
    /// Decoded ids, bottom to top; inserts are placed by it
    pub order: Vec<SheetId>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.close.is_empty() && self.restore.is_empty() && self.insert.is_empty()
    }
}

/// Plan the transitions from `stack` to `decoded`. Sheets present in both
/// keep their position and props; inserted sheets take the position the
/// URL gives them.
pub fn reconcile(stack: &SheetStack, decoded: &[SheetRecord]) -> Reconciliation {
    let wanted: HashSet<SheetId> = decoded.iter().map(|r| r.id).collect();

    let close = stack
        .open_sheets()
        .filter(|s| !wanted.contains(&s.id))
        .map(|s| s.id)
        .collect();

    let mut restore = Vec::new();
    let mut insert = Vec::new();
    for record in decoded {
        match stack.get(record.id) {
            Some(sheet) if sheet.phase.is_closing() => restore.push(record.id),
            Some(_) => {}
            None => insert.push(record.clone()),
        }
    }

    Reconciliation {
        close,
        restore,
        insert,
        order: decoded.iter().map(|r| r.id).collect(),
    }
}

/// Handle history reports
pub fn update_navigation(model: &mut SheetModel, msg: NavMsg) -> Option<Cmd> {
    match msg {
        NavMsg::Mounted { url, marker } => mount(model, url, marker),

        NavMsg::PopState { url, marker } => pop_state(model, url, marker),

        NavMsg::WriteFailed { url, marker } => {
            tracing::warn!(
                "History write failed; keeping {} open sheets in memory only",
                model.stack.open_count()
            );
            model.location = url;
            model.marker = marker.unwrap_or_default();
            model.url_sync = UrlSync::Suppressed(Suppression::NavigationFailed);
            None
        }

        NavMsg::TraversalFailed => {
            let in_flight = model.in_flight.take()?;
            tracing::warn!("Back navigation failed, closing without history");
            let fallback = match in_flight {
                InFlight::Close(id) => close_directly(model, &[id]),
                InFlight::ClearAll => {
                    let ids = model.stack.open_ids();
                    close_directly(model, &ids)
                }
            };
            let replayed = drain_deferred(model);
            Some(Cmd::batch(vec![
                fallback.unwrap_or_default(),
                replayed.unwrap_or_default(),
            ]))
        }
    }
}

/// Adopt the stack encoded in the initial URL and stamp the base entry
fn mount(model: &mut SheetModel, url: String, marker: Option<EntryMarker>) -> Option<Cmd> {
    if model.mounted {
        tracing::debug!("Ignoring repeated mount");
        return None;
    }
    model.mounted = true;
    model.location = url;

    if !model.config.enabled {
        model.marker = marker.unwrap_or_default();
        return None;
    }

    for record in codec::decode_url(&model.location, &model.config) {
        model
            .stack
            .push(Sheet::with_id(record.id, record.kind, record.props));
    }
    if !model.stack.is_empty() {
        tracing::info!("Restored {} sheets from URL", model.stack.len());
    }

    let open = model.stack.open_ids();
    // A reload keeps the entry's marker, so in-app back navigation still works
    let stamp = match marker {
        Some(existing) if existing.open == open => {
            model.marker = existing;
            None
        }
        Some(existing) => {
            model.marker = existing.replaced(open);
            Some(model.marker.clone())
        }
        None => {
            model.marker = EntryMarker::base(open);
            Some(model.marker.clone())
        }
    };

    let stamp = stamp.map(|marker| Cmd::ReplaceEntry {
        url: model.location.clone(),
        marker,
    });
    if model.stack.is_empty() {
        stamp
    } else {
        with_redraw(stamp)
    }
}

fn pop_state(model: &mut SheetModel, url: String, marker: Option<EntryMarker>) -> Option<Cmd> {
    model.location = url;
    model.marker = marker.unwrap_or_default();

    let mut cmds = Vec::new();

    if model.config.enabled {
        let decoded = codec::decode_url(&model.location, &model.config);
        let plan = reconcile(&model.stack, &decoded);
        if !plan.is_empty() {
            tracing::debug!(
                target: "sheets",
                close = plan.close.len(),
                restore = plan.restore.len(),
                insert = plan.insert.len(),
                "reconcile popstate"
            );
            cmds.extend(apply(model, plan));
            cmds.push(Cmd::Redraw);
        }
        model.url_sync = UrlSync::InSync;
    }

    if let Some(InFlight::ClearAll) = model.in_flight.take() {
        // Sheets deep-linked into the base entry survive the traversal
        let ids = model.stack.open_ids();
        cmds.push(close_directly(model, &ids).unwrap_or_default());
    }

    cmds.push(drain_deferred(model).unwrap_or_default());

    match Cmd::batch(cmds) {
        Cmd::None => None,
        cmd => Some(cmd),
    }
}

fn apply(model: &mut SheetModel, plan: Reconciliation) -> Vec<Cmd> {
    let mut cmds = Vec::new();

    for id in plan.close {
        if let Some(cmd) = begin_closing(model, id) {
            cmds.push(cmd);
        }
    }

    for id in plan.restore {
        if let Some(handle) = model.stack.restore(id) {
            tracing::debug!(target: "sheets", %id, "restore");
            cmds.push(Cmd::CancelEviction { handle });
        }
    }

    for record in plan.insert {
        tracing::debug!(target: "sheets", id = %record.id, kind = %record.kind, "insert");
        model.stack.insert_ordered(
            Sheet::with_id(record.id, record.kind, record.props),
            &plan.order,
        );
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::model::{Props, SheetKind};
    use crate::timer::TaskHandle;

    fn record(kind: SheetKind) -> SheetRecord {
        SheetRecord {
            kind,
            props: Props::new(),
            id: SheetId::generate(),
        }
    }

    fn stack_from(records: &[SheetRecord]) -> SheetStack {
        let mut stack = SheetStack::new();
        for r in records {
            stack.push(Sheet::with_id(r.id, r.kind, r.props.clone()));
        }
        stack
    }

    #[test]
    fn test_reconcile_closes_missing_and_inserts_new() {
        let a = record(SheetKind::ClientCreate);
        let b = record(SheetKind::OrderView);
        let c = record(SheetKind::ProductView);
        let stack = stack_from(&[a.clone(), b.clone()]);

        let plan = reconcile(&stack, &[a.clone(), c.clone()]);
        assert_eq!(plan.close, vec![b.id]);
        assert!(plan.restore.is_empty());
        assert_eq!(plan.insert, vec![c]);
    }

    #[test]
    fn test_reconcile_restores_closing_sheet() {
        let a = record(SheetKind::ClientCreate);
        let mut stack = stack_from(&[a.clone()]);
        stack.mark_closing(a.id, TaskHandle(1));

        let plan = reconcile(&stack, &[a.clone()]);
        assert_eq!(plan.restore, vec![a.id]);
        assert!(plan.close.is_empty());
        assert!(plan.insert.is_empty());
    }

    #[test]
    fn test_reconcile_keeps_url_order_for_inserts() {
        let a = record(SheetKind::ClientCreate);
        let b = record(SheetKind::OrderView);
        let stack = stack_from(&[b.clone()]);

        let plan = reconcile(&stack, &[a.clone(), b.clone()]);
        assert_eq!(plan.insert, vec![a.clone()]);
        assert_eq!(plan.order, vec![a.id, b.id]);

        let mut model = SheetModel::new(SheetConfig::default(), "https://admin.local/");
        model.stack = stack;
        apply(&mut model, plan);
        assert_eq!(model.stack.open_ids(), vec![a.id, b.id]);
    }

    #[test]
    fn test_reconcile_matching_stack_plans_nothing() {
        let a = record(SheetKind::ClientCreate);
        let b = record(SheetKind::OrderView);
        let stack = stack_from(&[a.clone(), b.clone()]);

        assert!(reconcile(&stack, &[a, b]).is_empty());
    }

    #[test]
    fn test_reconcile_ignores_closing_sheets_absent_from_url() {
        let a = record(SheetKind::ClientCreate);
        let mut stack = stack_from(&[a.clone()]);
        stack.mark_closing(a.id, TaskHandle(1));

        assert!(reconcile(&stack, &[]).is_empty());
    }
}
