//! Placeholder sheet for prototyping
//!
//! Shows the entity, the action and the props a real form or detail view
//! would be handed. Used by the demo binary and as the default renderer.

use serde_json::Value;

use crate::model::{Action, Props, SheetKind};
use crate::registry::SheetRenderer;

/// Placeholder sheet state
#[derive(Debug, Clone)]
pub struct PlaceholderSheet {
    pub kind: SheetKind,
}

impl PlaceholderSheet {
    pub fn new(kind: SheetKind) -> Self {
        Self { kind }
    }

    /// The `id` prop rendered for humans, if any
    fn entity_ref(props: &Props) -> Option<String> {
        match props.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl SheetRenderer for PlaceholderSheet {
    fn title(&self, props: &Props) -> String {
        let entity = self.kind.entity().display_name();
        let reference = Self::entity_ref(props)
            .map(|r| format!(" #{}", r))
            .unwrap_or_default();
        match self.kind.action() {
            Action::Create => format!("New {}", entity),
            Action::View => format!("View {}{}", entity, reference),
            Action::Update => format!("Edit {}{}", entity, reference),
        }
    }

    fn body(&self, props: &Props) -> String {
        if props.is_empty() {
            format!("{} (no props)", self.kind)
        } else {
            format!("{} {}", self.kind, Value::Object(props.clone()))
        }
    }

    // Forms lose input on an accidental overlay click
    fn dismiss_on_overlay(&self) -> bool {
        self.kind.action() == Action::View
    }
}
