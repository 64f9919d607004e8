//! Inventory item model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned item identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// An inventory record as returned by the API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub desired: u32,
    pub actual: u32,
}

impl Item {
    /// Units missing to reach the desired stock level.
    ///
    /// Negative when the item is overstocked; never clamped.
    pub fn needed(&self) -> i64 {
        i64::from(self.desired) - i64::from(self.actual)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.actual == 0
    }
}

/// Create payload - an item before the server has assigned its id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub desired: u32,
    pub actual: u32,
}

impl NewItem {
    pub fn new(name: impl Into<String>, desired: u32, actual: u32) -> Self {
        Self {
            name: name.into(),
            desired,
            actual,
        }
    }

    /// Attach the id the server assigned on creation
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            desired: self.desired,
            actual: self.actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(desired: u32, actual: u32) -> Item {
        NewItem::new("Widget", desired, actual).with_id(ItemId(1))
    }

    #[test]
    fn test_needed_shortfall() {
        assert_eq!(item(10, 3).needed(), 7);
    }

    #[test]
    fn test_needed_balanced() {
        assert_eq!(item(5, 5).needed(), 0);
    }

    #[test]
    fn test_needed_overstock_is_negative() {
        assert_eq!(item(2, 5).needed(), -3);
    }

    #[test]
    fn test_item_json_shape() {
        let json = serde_json::to_value(item(5, 0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Widget", "desired": 5, "actual": 0})
        );

        let payload = serde_json::to_value(NewItem::new("Widget", 5, 0)).unwrap();
        assert!(payload.get("id").is_none());
    }
}
