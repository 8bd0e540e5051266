//! Sheet registry tests
//!
//! Completeness checks at build time and mounting through custom renderers.

mod common;

use common::{controller_with, props, HOME};
use serde_json::json;

use sheet_stack::config::SheetConfig;
use sheet_stack::history::MemoryHistory;
use sheet_stack::panels::{default_registry, PlaceholderSheet};
use sheet_stack::registry::{RegistryError, SheetRenderer};
use sheet_stack::{Props, SheetController, SheetKind, SheetRegistry};

struct OrderDetail;

impl SheetRenderer for OrderDetail {
    fn title(&self, props: &Props) -> String {
        format!("Order {}", props.get("id").cloned().unwrap_or_default())
    }

    fn body(&self, _props: &Props) -> String {
        "line items".to_string()
    }

    fn dismiss_on_overlay(&self) -> bool {
        false
    }
}

fn registry_with_order_detail() -> SheetRegistry {
    SheetKind::ALL
        .into_iter()
        .fold(SheetRegistry::builder(), |builder, kind| {
            if kind == SheetKind::OrderView {
                builder.register(kind, OrderDetail)
            } else {
                builder.register(kind, PlaceholderSheet::new(kind))
            }
        })
        .build()
        .unwrap()
}

#[test]
fn test_default_registry_covers_every_kind() {
    let registry = default_registry().unwrap();
    for kind in SheetKind::ALL {
        assert!(!registry.renderer(kind).title(&Props::new()).is_empty());
    }
}

#[test]
fn test_missing_registration_is_startup_error() {
    let result = SheetRegistry::builder()
        .register(SheetKind::ClientCreate, PlaceholderSheet::new(SheetKind::ClientCreate))
        .build();

    match result {
        Err(RegistryError::Missing(kinds)) => {
            assert_eq!(kinds.len(), SheetKind::ALL.len() - 1);
            assert!(!kinds.contains(&SheetKind::ClientCreate));
        }
        other => panic!("expected missing kinds, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_duplicate_registration_is_startup_error() {
    let result = SheetKind::ALL
        .into_iter()
        .fold(SheetRegistry::builder(), |builder, kind| {
            builder.register(kind, PlaceholderSheet::new(kind))
        })
        .register(SheetKind::OrderView, OrderDetail)
        .build();

    assert_eq!(
        result.map(|_| ()),
        Err(RegistryError::Duplicate(SheetKind::OrderView))
    );
}

#[test]
fn test_controller_mounts_through_registered_renderer() {
    let history = MemoryHistory::new(HOME);
    let mut c: SheetController<MemoryHistory> =
        SheetController::new(SheetConfig::default(), history, registry_with_order_detail());

    c.open_sheet(SheetKind::ClientView, props(json!({"id": 3})));
    c.open_sheet(SheetKind::OrderView, props(json!({"id": 7})));

    let mounted = c.mounted();
    assert_eq!(mounted[0].title, "View client #3");
    assert!(mounted[0].dismiss_on_overlay);
    assert_eq!(mounted[1].title, "Order 7");
    assert_eq!(mounted[1].body, "line items");
    assert!(!mounted[1].dismiss_on_overlay);
}

#[test]
fn test_create_forms_do_not_dismiss_on_overlay() {
    let mut c = controller_with(SheetConfig::default(), MemoryHistory::new(HOME));
    c.open_sheet(SheetKind::ProductCreate, Props::new());

    assert!(!c.mounted()[0].dismiss_on_overlay);
    assert_eq!(c.mounted()[0].title, "New product");
}
