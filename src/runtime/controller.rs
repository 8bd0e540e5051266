//! Sheet controller - the public control surface and its event loop
//!
//! One controller is constructed at the application root and handed to
//! whatever needs to open or close sheets. It owns the model, the history,
//! the registry and the timer queue, and is the only place commands are
//! executed.
//!
//! Everything runs on one thread. `dispatch` runs a message and every
//! message it causes to completion; popstate notifications are picked up
//! by `run_until_idle`, one reconciliation at a time.

use std::collections::VecDeque;
use std::time::Duration;

use crate::codec;
use crate::commands::Cmd;
use crate::config::SheetConfig;
use crate::history::NavigationHistory;
use crate::messages::{Msg, NavMsg, SheetMsg, TimerMsg};
use crate::model::{Props, SheetId, SheetKind, SheetModel, SheetStack};
use crate::registry::{MountedSheet, SheetRegistry};
use crate::timer::DelayedTasks;
use crate::update::update;

pub struct SheetController<H: NavigationHistory> {
    model: SheetModel,
    history: H,
    registry: SheetRegistry,
    tasks: DelayedTasks<TimerMsg>,
    queue: VecDeque<Msg>,
    needs_redraw: bool,
}

impl<H: NavigationHistory> SheetController<H> {
    /// Create a controller and adopt whatever the current URL encodes
    pub fn new(config: SheetConfig, history: H, registry: SheetRegistry) -> Self {
        let model = SheetModel::new(config, history.location());
        let mut controller = Self {
            model,
            history,
            registry,
            tasks: DelayedTasks::new(),
            queue: VecDeque::new(),
            needs_redraw: false,
        };
        controller.mount();
        controller
    }

    fn mount(&mut self) {
        let msg = Msg::Nav(NavMsg::Mounted {
            url: self.history.location().to_string(),
            marker: self.history.marker().cloned(),
        });
        self.dispatch(msg);
    }

    // =====================================================================
    // Control surface
    // =====================================================================

    /// Open a sheet on top of the stack
    pub fn open_sheet(&mut self, kind: SheetKind, props: Props) {
        self.request(SheetMsg::Open { kind, props });
    }

    /// Close one sheet; no-op if it is absent or already closing
    pub fn close_sheet(&mut self, id: SheetId) {
        self.request(SheetMsg::Close(id));
    }

    /// Close the most recently opened open sheet of `kind`
    pub fn close_sheets_of_kind(&mut self, kind: SheetKind) {
        self.request(SheetMsg::CloseOfKind(kind));
    }

    /// Close every open sheet
    pub fn clear_all_sheets(&mut self) {
        self.request(SheetMsg::ClearAll);
    }

    /// Bring a closing sheet back before it is evicted
    pub fn restore_sheet(&mut self, id: SheetId) {
        self.request(SheetMsg::Restore(id));
    }

    /// Merge props into an open sheet
    pub fn patch_sheet(&mut self, id: SheetId, props: Props) {
        self.request(SheetMsg::PatchProps { id, props });
    }

    /// The current URL, or `None` while it does not carry the open sheets
    pub fn shareable_url(&self) -> Option<String> {
        self.model.shareable_url().map(str::to_string)
    }

    /// Whether the current URL carries a non-empty sheet stack
    pub fn has_persisted_sheets(&self) -> bool {
        !codec::decode_url(self.history.location(), &self.model.config).is_empty()
    }

    fn request(&mut self, msg: SheetMsg) {
        self.dispatch(Msg::Sheet(msg));
        self.run_until_idle();
    }

    // =====================================================================
    // Event loop
    // =====================================================================

    /// Process `msg` and every follow-up message it produces
    pub fn dispatch(&mut self, msg: Msg) {
        self.queue.push_back(msg);
        while let Some(msg) = self.queue.pop_front() {
            let Some(cmd) = update(&mut self.model, msg) else {
                continue;
            };
            self.needs_redraw |= cmd.needs_redraw();
            for cmd in cmd.flatten() {
                self.process_cmd(cmd);
            }
        }
    }

    /// Reconcile every pending popstate notification, one at a time
    pub fn run_until_idle(&mut self) {
        while let Some(event) = self.history.poll_event() {
            self.dispatch(Msg::from(event));
        }
    }

    /// Browser back/forward buttons: traverse, then reconcile
    pub fn navigate(&mut self, delta: isize) {
        if let Err(e) = self.history.go(delta) {
            tracing::warn!("Navigation by {} failed: {}", delta, e);
        }
        self.run_until_idle();
    }

    /// Advance the timer clock, firing due evictions
    pub fn advance(&mut self, by: Duration) {
        for msg in self.tasks.advance(by) {
            self.dispatch(Msg::Timer(msg));
        }
        self.run_until_idle();
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            // Redraw is collected per update in `dispatch`
            Cmd::None | Cmd::Redraw => {}
            Cmd::PushEntry { url, marker } => {
                if let Err(e) = self.history.push(&url, marker) {
                    tracing::warn!("History push failed: {}", e);
                    self.report_write_failure();
                }
            }
            Cmd::ReplaceEntry { url, marker } => {
                if let Err(e) = self.history.replace(&url, marker) {
                    tracing::warn!("History replace failed: {}", e);
                    self.report_write_failure();
                }
            }
            Cmd::Back { steps } => {
                let delta = -(steps as isize);
                if let Err(e) = self.history.go(delta) {
                    tracing::warn!("History traversal by {} failed: {}", delta, e);
                    self.queue.push_back(Msg::Nav(NavMsg::TraversalFailed));
                }
            }
            Cmd::ScheduleEviction {
                id,
                handle,
                delay_ms,
            } => {
                self.tasks.schedule(
                    handle,
                    Duration::from_millis(delay_ms),
                    TimerMsg::EvictionDue { id, handle },
                );
            }
            Cmd::CancelEviction { handle } => {
                self.tasks.cancel(handle);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn report_write_failure(&mut self) {
        self.queue.push_back(Msg::Nav(NavMsg::WriteFailed {
            url: self.history.location().to_string(),
            marker: self.history.marker().cloned(),
        }));
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn sheets(&self) -> &SheetStack {
        &self.model.stack
    }

    pub fn model(&self) -> &SheetModel {
        &self.model
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn tasks(&self) -> &DelayedTasks<TimerMsg> {
        &self.tasks
    }

    /// Every mounted sheet, bottom to top
    pub fn mounted(&self) -> Vec<MountedSheet> {
        self.registry.mount(&self.model.stack)
    }

    /// Whether the sheet layer changed since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
