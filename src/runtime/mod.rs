//! Runtime module - command execution and the event loop
//!
//! - `controller` - `SheetController`, the control surface the rest of the
//!   application talks to

pub mod controller;

pub use controller::SheetController;
