//! The ordered sheet stack
//!
//! Insertion order is z-order: later entries render above earlier ones.
//! The stack only enforces its own invariants (unique ids, legal phase
//! transitions); deciding *when* to transition is the update layer's job.

use crate::codec::SheetRecord;
use crate::timer::TaskHandle;

use super::sheet::{Phase, Props, Sheet, SheetId, SheetKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetStack {
    sheets: Vec<Sheet>,
}

impl SheetStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mounted sheets (open and closing)
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// All mounted sheets, bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    pub fn get(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SheetId) -> bool {
        self.get(id).is_some()
    }

    /// Append a sheet on top. Rejects a duplicate id.
    pub fn push(&mut self, sheet: Sheet) -> bool {
        if self.contains(sheet.id) {
            tracing::warn!("Refusing duplicate sheet id {}", sheet.id);
            return false;
        }
        self.sheets.push(sheet);
        true
    }

    /// Insert a sheet where `order` (bottom to top) places it: directly
    /// beneath the lowest entry that `order` lists after it, or on top when
    /// there is none. Rejects a duplicate id.
    pub fn insert_ordered(&mut self, sheet: Sheet, order: &[SheetId]) -> bool {
        if self.contains(sheet.id) {
            tracing::warn!("Refusing duplicate sheet id {}", sheet.id);
            return false;
        }
        let later = match order.iter().position(|id| *id == sheet.id) {
            Some(pos) => &order[pos + 1..],
            None => &[][..],
        };
        let idx = self
            .sheets
            .iter()
            .position(|s| later.contains(&s.id))
            .unwrap_or(self.sheets.len());
        self.sheets.insert(idx, sheet);
        true
    }

    /// Open sheets, bottom to top
    pub fn open_sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter().filter(|s| s.is_open())
    }

    pub fn open_count(&self) -> usize {
        self.open_sheets().count()
    }

    pub fn open_ids(&self) -> Vec<SheetId> {
        self.open_sheets().map(|s| s.id).collect()
    }

    /// The topmost open sheet
    pub fn top_open(&self) -> Option<&Sheet> {
        self.sheets.iter().rev().find(|s| s.is_open())
    }

    /// The most recently opened sheet of `kind` that is still open
    pub fn latest_open_of_kind(&self, kind: SheetKind) -> Option<SheetId> {
        self.sheets
            .iter()
            .rev()
            .find(|s| s.kind == kind && s.is_open())
            .map(|s| s.id)
    }

    /// Wire records for the open subset, in stack order
    pub fn open_records(&self) -> Vec<SheetRecord> {
        self.open_sheets().map(SheetRecord::from).collect()
    }

    /// `Open -> Closing`. Returns false if the sheet is absent or not open.
    pub fn mark_closing(&mut self, id: SheetId, eviction: TaskHandle) -> bool {
        match self.sheets.iter_mut().find(|s| s.id == id) {
            Some(sheet) if sheet.is_open() => {
                sheet.phase = Phase::Closing { eviction };
                true
            }
            _ => false,
        }
    }

    /// `Closing -> Open`. Returns the eviction handle that must be cancelled.
    pub fn restore(&mut self, id: SheetId) -> Option<TaskHandle> {
        let sheet = self.sheets.iter_mut().find(|s| s.id == id)?;
        match sheet.phase {
            Phase::Closing { eviction } => {
                sheet.phase = Phase::Open;
                Some(eviction)
            }
            Phase::Open => None,
        }
    }

    /// Remove a closing sheet, but only if `handle` is still its pending
    /// eviction. Stale timers from an earlier closing cycle are ignored.
    pub fn evict(&mut self, id: SheetId, handle: TaskHandle) -> bool {
        let Some(idx) = self.sheets.iter().position(|s| s.id == id) else {
            return false;
        };
        match self.sheets[idx].phase {
            Phase::Closing { eviction } if eviction == handle => {
                self.sheets.remove(idx);
                true
            }
            _ => false,
        }
    }

    /// Merge `props` into an open sheet's props
    pub fn patch_props(&mut self, id: SheetId, props: Props) -> bool {
        match self.sheets.iter_mut().find(|s| s.id == id) {
            Some(sheet) if sheet.is_open() => {
                sheet.props.extend(props);
                true
            }
            _ => false,
        }
    }
}
