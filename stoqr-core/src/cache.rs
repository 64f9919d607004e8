//! Client-side mirror of the server's item collection
//!
//! The cache is never authoritative: every mutation is applied in response to
//! a server result, and all lookups are keyed by [`ItemId`].

use crate::item::{Item, ItemId};

/// Ordered list of the last known items
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCache {
    items: Vec<Item>,
}

impl ItemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard prior contents and store `items` in server order
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// Add a freshly created item to the end
    pub fn append(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove every item with the given id.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_by_id(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Take one unit off the item's actual stock, stopping at zero.
    ///
    /// Returns `true` if the stock changed.
    pub fn decrement_actual(&mut self, id: ItemId) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if item.actual > 0 => {
                item.actual -= 1;
                true
            }
            _ => false,
        }
    }

    /// Overwrite the cached copy of `item` with the server's version.
    ///
    /// Returns `true` if the cached copy differed. Unknown ids are ignored.
    pub fn reconcile(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|cached| cached.id == item.id) {
            Some(cached) if *cached != item => {
                *cached = item;
                true
            }
            _ => false,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items with no stock left (menu badge)
    pub fn out_of_stock_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_out_of_stock()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;

    fn item(id: i64, name: &str, desired: u32, actual: u32) -> Item {
        NewItem::new(name, desired, actual).with_id(ItemId(id))
    }

    fn sample() -> Vec<Item> {
        vec![
            item(3, "Bolts", 100, 20),
            item(1, "Nuts", 50, 50),
            item(2, "Washers", 10, 0),
        ]
    }

    #[test]
    fn test_replace_all_keeps_server_order() {
        let mut cache = ItemCache::new();
        cache.append(item(9, "Stale", 1, 1));

        cache.replace_all(sample());

        assert_eq!(cache.items(), sample().as_slice());
        assert!(cache.get(ItemId(9)).is_none());
    }

    #[test]
    fn test_append_then_lookup() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        let widget = item(42, "Widget", 5, 0);
        cache.append(widget.clone());

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.items().last(), Some(&widget));
        assert_eq!(cache.get(ItemId(42)), Some(&widget));
    }

    #[test]
    fn test_remove_by_id_is_idempotent() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        assert!(cache.remove_by_id(ItemId(1)));
        assert!(cache.items().iter().all(|i| i.id != ItemId(1)));

        assert!(!cache.remove_by_id(ItemId(1)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_remove_by_id_matches_equal_but_distinct_copies() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        // A copy held by a view, not the cached instance itself
        let held = cache.items()[1].clone();
        assert!(cache.remove_by_id(held.id));
        assert!(cache.get(held.id).is_none());
    }

    #[test]
    fn test_remove_by_id_removes_duplicates() {
        let mut cache = ItemCache::new();
        cache.replace_all(vec![item(1, "A", 1, 1), item(1, "A", 1, 1)]);

        cache.remove_by_id(ItemId(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_decrement_actual_only_touches_target() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        assert!(cache.decrement_actual(ItemId(3)));

        assert_eq!(cache.get(ItemId(3)).map(|i| i.actual), Some(19));
        assert_eq!(cache.get(ItemId(1)), Some(&item(1, "Nuts", 50, 50)));
        assert_eq!(cache.get(ItemId(2)), Some(&item(2, "Washers", 10, 0)));
    }

    #[test]
    fn test_decrement_actual_floors_at_zero() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        assert!(!cache.decrement_actual(ItemId(2)));
        assert_eq!(cache.get(ItemId(2)).map(|i| i.actual), Some(0));
    }

    #[test]
    fn test_decrement_actual_unknown_id() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        assert!(!cache.decrement_actual(ItemId(77)));
        assert_eq!(cache.items(), sample().as_slice());
    }

    #[test]
    fn test_reconcile_uses_server_copy() {
        let mut cache = ItemCache::new();
        cache.replace_all(sample());

        assert!(cache.reconcile(item(3, "Bolts", 100, 12)));
        assert_eq!(cache.get(ItemId(3)).map(|i| i.actual), Some(12));

        // Same payload again is not a change
        assert!(!cache.reconcile(item(3, "Bolts", 100, 12)));
        // Unknown ids are not inserted
        assert!(!cache.reconcile(item(8, "Ghost", 1, 1)));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_out_of_stock_count() {
        let mut cache = ItemCache::new();
        assert_eq!(cache.out_of_stock_count(), 0);

        cache.replace_all(sample());
        assert_eq!(cache.out_of_stock_count(), 1);
    }
}
