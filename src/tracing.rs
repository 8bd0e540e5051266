//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! sheet transitions and history reconciliation.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=sheets=debug` - stack transitions only
//! - `RUST_LOG=sheet_stack::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/sheet-stack/logs/sheet-stack.log` with daily rotation.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{SheetId, SheetKind, SheetModel, UrlSync};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. The file layer
/// always logs at debug level.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "sheet-stack.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the sheet stack for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct StackSnapshot {
    pub sheets: Vec<SheetInfo>,
    pub url_sync: UrlSync,
    pub depth: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetInfo {
    pub id: SheetId,
    pub kind: SheetKind,
    pub open: bool,
}

impl StackSnapshot {
    pub fn from_model(model: &SheetModel) -> Self {
        Self {
            sheets: model
                .stack
                .iter()
                .map(|s| SheetInfo {
                    id: s.id,
                    kind: s.kind,
                    open: s.is_open(),
                })
                .collect(),
            url_sync: model.url_sync,
            depth: model.marker.depth,
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StackSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for before in &self.sheets {
            match other.sheets.iter().find(|s| s.id == before.id) {
                None => changes.push(format!("{} evicted", before.kind)),
                Some(after) if before.open && !after.open => {
                    changes.push(format!("{} closing", before.kind))
                }
                Some(after) if !before.open && after.open => {
                    changes.push(format!("{} restored", before.kind))
                }
                Some(_) => {}
            }
        }
        for after in &other.sheets {
            if !self.sheets.iter().any(|s| s.id == after.id) {
                changes.push(format!("{} opened", after.kind));
            }
        }

        if self.depth != other.depth {
            changes.push(format!("depth: {} → {}", self.depth, other.depth));
        }
        if self.url_sync != other.url_sync {
            changes.push(format!("url: {:?} → {:?}", self.url_sync, other.url_sync));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
