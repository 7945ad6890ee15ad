//! A stored shopping list and the edits a user makes to it directly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, entry::ShoppingListEntry};

/// Ordered list of entries. Serializes as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    entries: Vec<ShoppingListEntry>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ShoppingListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&ShoppingListEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> ResultEngine<&mut ShoppingListEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    pub fn set_completed(&mut self, id: Uuid, completed: bool) -> ResultEngine<()> {
        self.get_mut(id)?.completed = completed;
        Ok(())
    }

    /// Flip the completed flag and return the new state.
    pub fn toggle(&mut self, id: Uuid) -> ResultEngine<bool> {
        let entry = self.get_mut(id)?;
        entry.completed = !entry.completed;
        Ok(entry.completed)
    }

    pub fn remove(&mut self, id: Uuid) -> ResultEngine<ShoppingListEntry> {
        let idx = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    /// Drop every completed entry, returning how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.completed);
        before - self.entries.len()
    }
}

impl From<Vec<ShoppingListEntry>> for ShoppingList {
    fn from(entries: Vec<ShoppingListEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ShoppingListEntry {
        ShoppingListEntry::new(name.into(), None, "Divers".into(), None)
    }

    #[test]
    fn toggle_and_set_completed() {
        let mut list = ShoppingList::from(vec![entry("Sel"), entry("Poivre")]);
        let id = list.entries()[1].id;

        assert_eq!(list.toggle(id), Ok(true));
        assert!(list.get(id).unwrap().completed);
        list.set_completed(id, false).unwrap();
        assert!(!list.get(id).unwrap().completed);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut list = ShoppingList::from(vec![entry("A"), entry("B"), entry("C")]);
        let id = list.entries()[1].id;
        let removed = list.remove(id).unwrap();
        assert_eq!(removed.name, "B");
        let names: Vec<_> = list.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn unknown_id_is_key_not_found() {
        let mut list = ShoppingList::new();
        let id = Uuid::new_v4();
        assert_eq!(
            list.toggle(id),
            Err(EngineError::KeyNotFound(id.to_string()))
        );
        assert!(list.remove(id).is_err());
        assert!(list.set_completed(id, true).is_err());
    }

    #[test]
    fn clear_completed_counts_removed() {
        let mut list = ShoppingList::from(vec![entry("A"), entry("B"), entry("C")]);
        let first = list.entries()[0].id;
        let last = list.entries()[2].id;
        list.set_completed(first, true).unwrap();
        list.set_completed(last, true).unwrap();

        assert_eq!(list.clear_completed(), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].name, "B");
        assert_eq!(list.clear_completed(), 0);
    }

    #[test]
    fn serializes_as_array() {
        let list = ShoppingList::from(vec![entry("A")]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        let back: ShoppingList = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }
}
