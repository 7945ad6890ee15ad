//! Merging incoming items into a list.

use crate::{
    Engine,
    entry::{IncomingItem, ShoppingListEntry},
    list::ShoppingList,
    quantity::{ParsedQuantity, Quantity},
    recipe::Recipe,
    util::{normalize_key, normalize_optional_text},
};

impl Engine {
    /// Merge `incoming` into a copy of `existing`.
    ///
    /// Items are handled one at a time against the growing result, so two
    /// duplicates inside the same batch merge together too. An item merges
    /// into the first open entry with the same normalized name and the same
    /// category, provided both quantities are measured in the same unit
    /// family; otherwise it is appended. Merged entries keep their position
    /// and unit spelling. Never fails.
    pub fn reconcile(
        &self,
        existing: &[ShoppingListEntry],
        incoming: &[IncomingItem],
    ) -> Vec<ShoppingListEntry> {
        let mut entries = existing.to_vec();
        for item in incoming {
            self.reconcile_item(&mut entries, item);
        }
        entries
    }

    pub fn reconcile_list(&self, list: &ShoppingList, incoming: &[IncomingItem]) -> ShoppingList {
        ShoppingList::from(self.reconcile(list.entries(), incoming))
    }

    /// Add every ingredient of `recipe`, tagged with the recipe name.
    pub fn add_recipe(
        &self,
        existing: &[ShoppingListEntry],
        recipe: &Recipe,
    ) -> Vec<ShoppingListEntry> {
        self.reconcile(existing, &recipe.incoming_items())
    }

    fn reconcile_item(&self, entries: &mut Vec<ShoppingListEntry>, item: &IncomingItem) {
        let name_norm = normalize_key(&item.name);
        let category = self
            .classifier
            .resolve_normalized(item.category.as_deref(), &name_norm);
        let quantity = item.parsed_quantity();

        let target = entries.iter().position(|entry| {
            !entry.completed && entry.category == category && normalize_key(&entry.name) == name_norm
        });

        if let Some(idx) = target {
            if let Some(merged) = self.merged_quantity(&entries[idx], &quantity) {
                tracing::debug!(
                    "merged '{}' into entry {}: {:?} -> {merged}",
                    item.name,
                    entries[idx].id,
                    entries[idx].quantity
                );
                entries[idx].quantity = Some(merged);
                return;
            }
            tracing::debug!(
                "'{}' matches entry {} but quantities do not add up, appending",
                item.name,
                entries[idx].id
            );
        }

        let entry = ShoppingListEntry::new(
            item.name.clone(),
            quantity.as_measured().map(ToString::to_string),
            category,
            normalize_optional_text(item.provenance.as_deref()),
        );
        tracing::debug!("appended '{}' as entry {}", entry.name, entry.id);
        entries.push(entry);
    }

    /// Sum of both quantities written with the target's unit, or `None` when
    /// either side is unmeasured or the units belong to different families.
    fn merged_quantity(
        &self,
        target: &ShoppingListEntry,
        incoming: &ParsedQuantity,
    ) -> Option<String> {
        let (ParsedQuantity::Measured(current), ParsedQuantity::Measured(added)) =
            (target.parsed_quantity(), incoming)
        else {
            return None;
        };
        if !self.units.same_family(&current.unit, &added.unit) {
            return None;
        }
        let total = current.amount.checked_add(added.amount)?;
        Some(Quantity::new(total, current.unit).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, quantity: Option<&str>, category: &str) -> ShoppingListEntry {
        ShoppingListEntry::new(
            name.into(),
            quantity.map(str::to_string),
            category.into(),
            None,
        )
    }

    #[test]
    fn merge_keeps_every_other_field() {
        let engine = Engine::default();
        let mut existing = entry("Carotte", Some("500 g"), "Fruits et légumes");
        existing.provenance = Some("Pot-au-feu".into());

        let out = engine.reconcile(
            &[existing.clone()],
            &[IncomingItem::new("CAROTTE", 250.0, "g").with_provenance("Soupe")],
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, existing.id);
        assert_eq!(out[0].name, "Carotte");
        assert_eq!(out[0].quantity.as_deref(), Some("750 g"));
        assert_eq!(out[0].provenance.as_deref(), Some("Pot-au-feu"));
        assert!(!out[0].completed);
    }

    #[test]
    fn unmeasured_target_is_not_merged() {
        let engine = Engine::default();
        let existing = entry("Sel", None, "Divers");

        let out = engine.reconcile(&[existing], &[IncomingItem::new("sel", 1.0, "pincée")]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[1].quantity.as_deref(), Some("1 pincée"));
    }

    #[test]
    fn unparseable_target_quantity_is_not_merged() {
        let engine = Engine::default();
        let existing = entry("Sel", Some("une pincée"), "Divers");

        let out = engine.reconcile(&[existing], &[IncomingItem::new("Sel", 1.0, "pincée")]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].quantity.as_deref(), Some("une pincée"));
    }

    #[test]
    fn unusable_incoming_quantity_appends_without_quantity() {
        let engine = Engine::default();
        let existing = entry("Sucre", Some("100 g"), "Divers");

        let out = engine.reconcile(&[existing], &[IncomingItem::new("Sucre", f64::NAN, "g")]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].quantity.as_deref(), Some("100 g"));
        assert_eq!(out[1].quantity, None);
        assert_eq!(out[1].category, "Divers");
    }

    #[test]
    fn only_first_candidate_is_considered() {
        let engine = Engine::default();
        let grams = entry("Sucre", Some("100 g"), "Divers");
        let pieces = entry("Sucre", Some("2 pièces"), "Divers");

        let out = engine.reconcile(
            &[grams, pieces],
            &[IncomingItem::new("sucre", 1.0, "piece")],
        );

        assert_eq!(out.len(), 3);
        assert_eq!(out[1].quantity.as_deref(), Some("2 pièces"));
        assert_eq!(out[2].quantity.as_deref(), Some("1 piece"));
    }

    #[test]
    fn bare_count_merges_with_pieces() {
        let engine = Engine::default();
        let existing = entry("Œufs", Some("3"), "Produits laitiers");

        let out = engine.reconcile(
            &[existing],
            &[
                IncomingItem::new("œufs", 2.0, "pièces"),
                IncomingItem::new("Œufs", 1.0, ""),
            ],
        );

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].quantity.as_deref(), Some("6"));

        let existing = entry("Œufs", Some("2 pièces"), "Produits laitiers");
        let out = engine.reconcile(&[existing], &[IncomingItem::new("Œufs", 3.0, "")]);
        assert_eq!(out[0].quantity.as_deref(), Some("5 pièces"));
    }

    #[test]
    fn blank_explicit_category_uses_classifier() {
        let engine = Engine::default();
        let out = engine.reconcile(&[], &[IncomingItem::new("Lait", 1.0, "L").with_category("  ")]);
        assert_eq!(out[0].category, "Produits laitiers");
    }

    #[test]
    fn recipe_items_carry_provenance() {
        let engine = Engine::default();
        let recipe = Recipe {
            name: "Purée".into(),
            ingredients: vec![
                crate::recipe::Ingredient {
                    name: "Pommes de terre".into(),
                    quantity: 1.0,
                    unit: "kg".into(),
                },
                crate::recipe::Ingredient {
                    name: "Lait".into(),
                    quantity: 20.0,
                    unit: "cl".into(),
                },
            ],
        };

        let out = engine.add_recipe(&[], &recipe);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].quantity.as_deref(), Some("1 kg"));
        assert_eq!(out[0].category, "Fruits et légumes");
        assert_eq!(out[1].provenance.as_deref(), Some("Purée"));
        assert!(out.iter().all(|e| !e.completed));
    }
}
