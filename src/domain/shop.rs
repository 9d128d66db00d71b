use crate::error::PetError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a purchasable item, e.g. `toy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Result<Self, PetError> {
        let raw = raw.into();
        if !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            Ok(Self(raw))
        } else {
            Err(PetError::ConfigError(format!("invalid item id {raw:?}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = PetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed stat deltas applied by a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemEffect {
    #[serde(default)]
    pub hunger: i32,
    #[serde(default)]
    pub happiness: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub cost: u64,
    #[serde(flatten)]
    pub effect: ItemEffect,
    /// Button caption; derived from the id when absent.
    #[serde(default)]
    pub label: Option<String>,
}

impl ShopItem {
    pub fn new(cost: u64, hunger: i32, happiness: i32) -> Self {
        Self {
            cost,
            effect: ItemEffect { hunger, happiness },
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Static table of everything the shop sells.
///
/// Read-only once built; share it behind an `Arc` across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopCatalog {
    #[serde(default)]
    items: BTreeMap<ItemId, ShopItem>,
}

impl Default for ShopCatalog {
    fn default() -> Self {
        let mut items = BTreeMap::new();
        items.insert(
            ItemId("toy".to_string()),
            ShopItem::new(5, 0, 2).with_label("Buy Toy"),
        );
        items.insert(
            ItemId("treat".to_string()),
            ShopItem::new(3, -2, 0).with_label("Buy Treat"),
        );
        Self { items }
    }
}

impl ShopCatalog {
    pub fn empty() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    pub fn with_item(mut self, id: ItemId, item: ShopItem) -> Self {
        self.items.insert(id, item);
        self
    }

    /// Looks up an item by its raw identifier. Unknown ids yield `None`.
    pub fn get(&self, id: &str) -> Option<&ShopItem> {
        self.items.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &ShopItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
