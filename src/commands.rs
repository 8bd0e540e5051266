//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::history::EntryMarker;
use crate::model::SheetId;
use crate::timer::TaskHandle;

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Re-mount the sheet layer
    Redraw,
    /// Add a new history entry
    PushEntry { url: String, marker: EntryMarker },
    /// Overwrite the current history entry
    ReplaceEntry { url: String, marker: EntryMarker },
    /// Traverse back `steps` entries; a popstate reports the result
    Back { steps: usize },
    /// Start the exit-animation timer for a closing sheet
    /// After delay_ms, sends Msg::Timer(EvictionDue)
    ScheduleEviction {
        id: SheetId,
        handle: TaskHandle,
        delay_ms: u64,
    },
    /// Stop a pending eviction timer
    CancelEviction { handle: TaskHandle },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops and unwrapping singletons
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            _ => false,
        }
    }

    /// Flatten nested batches into execution order
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}

/// Fold an optional command into a batch
pub fn with_redraw(cmd: Option<Cmd>) -> Option<Cmd> {
    Some(Cmd::batch(vec![cmd.unwrap_or_default(), Cmd::Redraw]))
}
