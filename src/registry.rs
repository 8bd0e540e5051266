//! Sheet registry - one renderer per sheet kind, checked at startup
//!
//! The builder refuses to produce a registry unless every [`SheetKind`] has
//! exactly one renderer, so a missing registration is a startup error and
//! never a blank sheet at render time.

use crate::messages::Msg;
use crate::model::{Phase, Props, SheetId, SheetKind, SheetStack};

/// Base z-index for the sheet layer
const BASE_SHEET_Z: u32 = 1000;

/// Z-index increment between stacked sheets
const Z_INCREMENT: u32 = 10;

/// Renders the content of one kind of sheet
///
/// Renderers only see props; fetching and mutating the entity is the
/// content component's own business.
pub trait SheetRenderer: Send + Sync {
    /// Header line of the sheet
    fn title(&self, props: &Props) -> String;

    /// Body content of the sheet
    fn body(&self, props: &Props) -> String;

    /// Whether clicking the overlay behind the sheet dismisses it
    fn dismiss_on_overlay(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no renderer registered for: {}", format_kinds(.0))]
    Missing(Vec<SheetKind>),
    #[error("renderer registered twice for {0}")]
    Duplicate(SheetKind),
}

fn format_kinds(kinds: &[SheetKind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collects renderers until every kind is covered
pub struct RegistryBuilder {
    renderers: Vec<Option<Box<dyn SheetRenderer>>>,
    duplicate: Option<SheetKind>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            renderers: SheetKind::ALL.iter().map(|_| None).collect(),
            duplicate: None,
        }
    }

    /// Register the renderer for `kind`
    pub fn register(mut self, kind: SheetKind, renderer: impl SheetRenderer + 'static) -> Self {
        let slot = &mut self.renderers[kind.index()];
        if slot.is_some() && self.duplicate.is_none() {
            self.duplicate = Some(kind);
        }
        *slot = Some(Box::new(renderer));
        self
    }

    /// Finish the registry, failing on any missing or duplicate kind
    pub fn build(self) -> Result<SheetRegistry, RegistryError> {
        if let Some(kind) = self.duplicate {
            return Err(RegistryError::Duplicate(kind));
        }

        let missing: Vec<SheetKind> = SheetKind::ALL
            .into_iter()
            .filter(|kind| self.renderers[kind.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::Missing(missing));
        }

        Ok(SheetRegistry {
            renderers: self.renderers.into_iter().flatten().collect(),
        })
    }
}

/// Complete kind → renderer table
pub struct SheetRegistry {
    /// Indexed by [`SheetKind::index`]; complete by construction
    renderers: Vec<Box<dyn SheetRenderer>>,
}

impl std::fmt::Debug for SheetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetRegistry")
            .field("kinds", &self.renderers.len())
            .finish()
    }
}

/// One sheet ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct MountedSheet {
    pub id: SheetId,
    pub kind: SheetKind,
    pub phase: Phase,
    pub z_index: u32,
    pub title: String,
    pub body: String,
    pub dismiss_on_overlay: bool,
    /// Message the sheet's dismiss affordances send
    pub close: Msg,
}

impl MountedSheet {
    /// Closing sheets stay mounted for their exit animation
    pub fn is_visible(&self) -> bool {
        self.phase.is_open()
    }
}

impl SheetRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn renderer(&self, kind: SheetKind) -> &dyn SheetRenderer {
        &*self.renderers[kind.index()]
    }

    /// Mount every sheet in the stack, open and closing, bottom to top
    pub fn mount(&self, stack: &SheetStack) -> Vec<MountedSheet> {
        stack
            .iter()
            .enumerate()
            .map(|(i, sheet)| {
                let renderer = self.renderer(sheet.kind);
                MountedSheet {
                    id: sheet.id,
                    kind: sheet.kind,
                    phase: sheet.phase,
                    z_index: BASE_SHEET_Z + i as u32 * Z_INCREMENT,
                    title: renderer.title(&sheet.props),
                    body: renderer.body(&sheet.props),
                    dismiss_on_overlay: renderer.dismiss_on_overlay(),
                    close: Msg::close(sheet.id),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sheet;
    use crate::timer::TaskHandle;

    struct Fixed(&'static str);

    impl SheetRenderer for Fixed {
        fn title(&self, _props: &Props) -> String {
            self.0.to_string()
        }

        fn body(&self, props: &Props) -> String {
            serde_json::Value::Object(props.clone()).to_string()
        }
    }

    fn full_builder() -> RegistryBuilder {
        SheetKind::ALL
            .into_iter()
            .fold(SheetRegistry::builder(), |b, kind| b.register(kind, Fixed(kind.as_str())))
    }

    #[test]
    fn test_complete_registry_builds() {
        let registry = full_builder().build().unwrap();
        assert_eq!(
            registry.renderer(SheetKind::OrderView).title(&Props::new()),
            "order:view"
        );
    }

    #[test]
    fn test_missing_kinds_fail_build() {
        let err = SheetRegistry::builder()
            .register(SheetKind::ClientCreate, Fixed("x"))
            .build()
            .unwrap_err();
        match err {
            RegistryError::Missing(kinds) => {
                assert_eq!(kinds.len(), SheetKind::ALL.len() - 1);
                assert!(!kinds.contains(&SheetKind::ClientCreate));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_registration_fails_build() {
        let err = full_builder()
            .register(SheetKind::OrderView, Fixed("again"))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate(SheetKind::OrderView));
        assert_eq!(err.to_string(), "renderer registered twice for order:view");
    }

    #[test]
    fn test_mount_includes_closing_sheets_in_z_order() {
        let registry = full_builder().build().unwrap();
        let mut stack = SheetStack::new();
        let bottom = Sheet::open(SheetKind::ClientView, Props::new());
        let top = Sheet::open(SheetKind::OrderView, Props::new());
        let top_id = top.id;
        stack.push(bottom);
        stack.push(top);
        stack.mark_closing(top_id, TaskHandle(1));

        let mounted = registry.mount(&stack);
        assert_eq!(mounted.len(), 2);
        assert!(mounted[0].is_visible());
        assert!(!mounted[1].is_visible());
        assert!(mounted[1].z_index > mounted[0].z_index);
        assert_eq!(mounted[1].close, Msg::close(top_id));
    }
}
