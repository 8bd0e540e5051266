//! Sheet content implementations
//!
//! Concrete renderers that can be registered for sheet kinds.
//!
//! ## Available Sheets
//!
//! - **PlaceholderSheet**: Generic placeholder for every kind, used until a
//!   real form or detail view is registered

mod placeholder;

pub use placeholder::PlaceholderSheet;

use crate::model::SheetKind;
use crate::registry::{RegistryError, SheetRegistry};

/// Registry with a placeholder for every kind
pub fn default_registry() -> Result<SheetRegistry, RegistryError> {
    SheetKind::ALL
        .into_iter()
        .fold(SheetRegistry::builder(), |builder, kind| {
            builder.register(kind, PlaceholderSheet::new(kind))
        })
        .build()
}
