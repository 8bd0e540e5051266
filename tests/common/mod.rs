//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Duration;

use sheet_stack::codec;
use sheet_stack::config::SheetConfig;
use sheet_stack::history::MemoryHistory;
use sheet_stack::panels::default_registry;
use sheet_stack::{Props, SheetController, SheetId, SheetKind};

pub const HOME: &str = "https://admin.local/orders?page=2";

pub type Controller = SheetController<MemoryHistory>;

/// Controller on a fresh session at `url` with default config
pub fn controller(url: &str) -> Controller {
    controller_with(SheetConfig::default(), MemoryHistory::new(url))
}

/// Controller over a prepared history
pub fn controller_with(config: SheetConfig, history: MemoryHistory) -> Controller {
    let registry = default_registry().expect("default registry covers every kind");
    SheetController::new(config, history, registry)
}

/// Props from a JSON object literal
pub fn props(value: serde_json::Value) -> Props {
    value.as_object().cloned().unwrap_or_default()
}

/// Open a sheet and return its id
pub fn open(controller: &mut Controller, kind: SheetKind, props: Props) -> SheetId {
    controller.open_sheet(kind, props);
    controller
        .sheets()
        .top_open()
        .map(|s| s.id)
        .expect("sheet was just opened")
}

/// Ids the current history entry's URL decodes to, in order
pub fn url_ids(controller: &Controller) -> Vec<SheetId> {
    codec::decode_url(&controller.history().current().url, &controller.model().config)
        .into_iter()
        .map(|r| r.id)
        .collect()
}

/// Kinds the current history entry's URL decodes to, in order
pub fn url_kinds(controller: &Controller) -> Vec<SheetKind> {
    codec::decode_url(&controller.history().current().url, &controller.model().config)
        .into_iter()
        .map(|r| r.kind)
        .collect()
}

pub fn open_ids(controller: &Controller) -> Vec<SheetId> {
    controller.sheets().open_ids()
}

/// Run past the eviction delay
pub fn settle(controller: &mut Controller) {
    let delay = controller.model().config.evict_delay();
    controller.advance(delay + Duration::from_millis(1));
}

/// A deep-link URL carrying fresh sheets of `kinds`
pub fn deep_link(base: &str, kinds: &[SheetKind]) -> (String, Vec<SheetId>) {
    let records: Vec<codec::SheetRecord> = kinds
        .iter()
        .map(|kind| codec::SheetRecord {
            kind: *kind,
            props: Props::new(),
            id: SheetId::generate(),
        })
        .collect();
    let ids = records.iter().map(|r| r.id).collect();
    let payload = codec::encode(&records, true);
    let url = sheet_stack::history::location::with_param(base, "sheets", &payload)
        .expect("base URL parses");
    (url, ids)
}
