//! Sheet Stack - Elm-style stacked sheet manager
//!
//! This crate provides the core types and logic for stacking modal sheets
//! in an admin dashboard, persisting the open stack into the URL and keeping
//! it in step with back/forward navigation.

pub mod codec;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod history;
pub mod messages;
pub mod model;
pub mod panels;
pub mod registry;
pub mod runtime;
pub mod timer;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::SheetConfig;
pub use history::{MemoryHistory, NavigationHistory};
pub use messages::Msg;
pub use model::{Props, SheetId, SheetKind, SheetModel};
pub use registry::SheetRegistry;
pub use runtime::SheetController;
