use std::collections::HashMap;

use super::types::{Area, NavigationItem};

/// Focusable items grouped by area, in traversal order
#[derive(Debug, Default, Clone)]
pub struct NavigationRegistry {
    areas: HashMap<Area, Vec<NavigationItem>>,
}

impl NavigationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, replacing any existing item with the same id in place
    pub fn register(&mut self, item: NavigationItem) {
        let items = self.areas.entry(item.area).or_default();
        match items.iter().position(|existing| existing.id == item.id) {
            Some(pos) => items[pos] = item,
            None => items.push(item),
        }
    }

    /// Remove an item; absent ids are ignored
    pub fn unregister(&mut self, id: &str, area: Area) {
        if let Some(items) = self.areas.get_mut(&area) {
            items.retain(|item| item.id != id);
        }
    }

    /// Remove every item of an area
    pub fn clear_area(&mut self, area: Area) {
        self.areas.remove(&area);
    }

    pub fn items(&self, area: Area) -> &[NavigationItem] {
        self.areas.get(&area).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, area: Area) -> usize {
        self.items(area).len()
    }

    pub fn is_empty(&self, area: Area) -> bool {
        self.len(area) == 0
    }

    pub fn get(&self, area: Area, index: usize) -> Option<&NavigationItem> {
        self.items(area).get(index)
    }

    pub fn position(&self, area: Area, id: &str) -> Option<usize> {
        self.items(area).iter().position(|item| item.id == id)
    }
}
