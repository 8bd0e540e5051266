//! Sheet instances - kinds, ids, props and lifecycle phase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::TaskHandle;

/// Arbitrary key/value props handed to a sheet's renderer untouched
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Opaque, never-reused identifier for one sheet instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(Uuid);

impl SheetId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SheetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Entity a sheet operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Client,
    Order,
    Product,
}

impl Entity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Entity::Client => "client",
            Entity::Order => "order",
            Entity::Product => "product",
        }
    }
}

/// What a sheet does with its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    View,
    Update,
}

/// Closed set of sheet kinds the dashboard can stack
///
/// Serialized as `"entity:action"` both in URLs and in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SheetKind {
    #[serde(rename = "client:create")]
    ClientCreate,
    #[serde(rename = "client:view")]
    ClientView,
    #[serde(rename = "client:update")]
    ClientUpdate,
    #[serde(rename = "order:create")]
    OrderCreate,
    #[serde(rename = "order:view")]
    OrderView,
    #[serde(rename = "order:update")]
    OrderUpdate,
    #[serde(rename = "product:create")]
    ProductCreate,
    #[serde(rename = "product:view")]
    ProductView,
    #[serde(rename = "product:update")]
    ProductUpdate,
}

impl SheetKind {
    /// All kinds, in registry order
    pub const ALL: [SheetKind; 9] = [
        SheetKind::ClientCreate,
        SheetKind::ClientView,
        SheetKind::ClientUpdate,
        SheetKind::OrderCreate,
        SheetKind::OrderView,
        SheetKind::OrderUpdate,
        SheetKind::ProductCreate,
        SheetKind::ProductView,
        SheetKind::ProductUpdate,
    ];

    /// Position of this kind in [`SheetKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn entity(&self) -> Entity {
        match self {
            SheetKind::ClientCreate | SheetKind::ClientView | SheetKind::ClientUpdate => {
                Entity::Client
            }
            SheetKind::OrderCreate | SheetKind::OrderView | SheetKind::OrderUpdate => {
                Entity::Order
            }
            SheetKind::ProductCreate | SheetKind::ProductView | SheetKind::ProductUpdate => {
                Entity::Product
            }
        }
    }

    pub fn action(&self) -> Action {
        match self {
            SheetKind::ClientCreate | SheetKind::OrderCreate | SheetKind::ProductCreate => {
                Action::Create
            }
            SheetKind::ClientView | SheetKind::OrderView | SheetKind::ProductView => Action::View,
            SheetKind::ClientUpdate | SheetKind::OrderUpdate | SheetKind::ProductUpdate => {
                Action::Update
            }
        }
    }

    /// Wire name, e.g. `"order:view"`
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetKind::ClientCreate => "client:create",
            SheetKind::ClientView => "client:view",
            SheetKind::ClientUpdate => "client:update",
            SheetKind::OrderCreate => "order:create",
            SheetKind::OrderView => "order:view",
            SheetKind::OrderUpdate => "order:update",
            SheetKind::ProductCreate => "product:create",
            SheetKind::ProductView => "product:view",
            SheetKind::ProductUpdate => "product:update",
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown sheet kind: {}", s))
    }
}

/// Lifecycle phase of a mounted sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted and visible
    Open,
    /// Mounted and exit-animating; evicted when `eviction` fires
    Closing { eviction: TaskHandle },
}

impl Phase {
    pub fn is_open(&self) -> bool {
        matches!(self, Phase::Open)
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, Phase::Closing { .. })
    }
}

/// One open or closing sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub id: SheetId,
    pub kind: SheetKind,
    pub props: Props,
    pub phase: Phase,
}

impl Sheet {
    /// Create an open sheet with a fresh id
    pub fn open(kind: SheetKind, props: Props) -> Self {
        Self::with_id(SheetId::generate(), kind, props)
    }

    /// Create an open sheet with a known id (restored from a URL)
    pub fn with_id(id: SheetId, kind: SheetKind, props: Props) -> Self {
        Self {
            id,
            kind,
            props,
            phase: Phase::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names_round_trip_through_from_str() {
        for kind in SheetKind::ALL {
            assert_eq!(kind.as_str().parse::<SheetKind>(), Ok(kind));
        }
        assert!("invoice:view".parse::<SheetKind>().is_err());
    }

    #[test]
    fn test_kind_serde_uses_wire_name() {
        let json = serde_json::to_string(&SheetKind::OrderView).unwrap();
        assert_eq!(json, "\"order:view\"");
        let kind: SheetKind = serde_json::from_str("\"client:create\"").unwrap();
        assert_eq!(kind, SheetKind::ClientCreate);
    }

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in SheetKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_kind_entity_and_action() {
        assert_eq!(SheetKind::OrderUpdate.entity(), Entity::Order);
        assert_eq!(SheetKind::OrderUpdate.action(), Action::Update);
        assert_eq!(SheetKind::ClientCreate.entity(), Entity::Client);
        assert_eq!(SheetKind::ProductView.action(), Action::View);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SheetId::generate();
        let b = SheetId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<SheetId>().unwrap(), a);
    }
}
