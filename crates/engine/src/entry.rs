//! The module contains the shopping-list item types.
//!
//! [`ShoppingListEntry`] is what a list stores; [`IncomingItem`] is what a
//! caller hands to the engine to be merged into a list.
use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quantity::{Amount, ParsedQuantity, Quantity};

/// One line of a shopping list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    pub id: Uuid,
    /// Name as typed, kept for display.
    pub name: String,
    /// Amount followed by the unit as written, e.g. `"500 g"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<String>,
}

impl ShoppingListEntry {
    pub fn new(
        name: String,
        quantity: Option<String>,
        category: String,
        provenance: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            quantity,
            category,
            completed: false,
            provenance,
        }
    }

    /// Structured view of `quantity`.
    pub fn parsed_quantity(&self) -> ParsedQuantity {
        ParsedQuantity::from(self.quantity.as_deref())
    }
}

impl fmt::Display for ShoppingListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {}", self.name)?;
        if let Some(quantity) = &self.quantity {
            write!(f, " ({quantity})")?;
        }
        write!(f, " - {}", self.category)
    }
}

/// An item to add to a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncomingItem {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<String>,
}

impl IncomingItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: None,
            provenance: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = Some(provenance.into());
        self
    }

    /// Structured quantity, [`Unmeasured`](ParsedQuantity::Unmeasured) when
    /// the number is negative or not finite.
    pub fn parsed_quantity(&self) -> ParsedQuantity {
        match Amount::from_f64(self.quantity) {
            Some(amount) => ParsedQuantity::Measured(Quantity::new(amount, self.unit.as_str())),
            None => {
                tracing::trace!(
                    "incoming '{}' has no usable quantity ({})",
                    self.name,
                    self.quantity
                );
                ParsedQuantity::Unmeasured
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_open_with_fresh_id() {
        let a = ShoppingListEntry::new("Lait".into(), Some("1 L".into()), "Divers".into(), None);
        let b = ShoppingListEntry::new("Lait".into(), Some("1 L".into()), "Divers".into(), None);
        assert!(!a.completed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn display_shows_mark_and_quantity() {
        let mut entry = ShoppingListEntry::new(
            "Carotte".into(),
            Some("500 g".into()),
            "Fruits et légumes".into(),
            None,
        );
        assert_eq!(entry.to_string(), "[ ] Carotte (500 g) - Fruits et légumes");
        entry.completed = true;
        entry.quantity = None;
        assert_eq!(entry.to_string(), "[x] Carotte - Fruits et légumes");
    }

    #[test]
    fn incoming_quantity_is_tagged() {
        let item = IncomingItem::new("Farine", 250.0, " g ");
        assert_eq!(
            item.parsed_quantity(),
            ParsedQuantity::Measured(Quantity::new(Amount::from_thousandths(250_000), "g"))
        );
        assert_eq!(
            IncomingItem::new("Farine", -1.0, "g").parsed_quantity(),
            ParsedQuantity::Unmeasured
        );
    }

    #[test]
    fn entry_json_omits_empty_fields() {
        let entry = ShoppingListEntry::new("Sel".into(), None, "Divers".into(), None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("quantity").is_none());
        assert!(json.get("provenance").is_none());
        assert_eq!(json["completed"], false);

        let back: ShoppingListEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
