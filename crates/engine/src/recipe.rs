//! Recipe expansion.
//!
//! A recipe turns into one incoming item per ingredient, tagged with the
//! recipe name so the list shows where each line came from.

use serde::{Deserialize, Serialize};

use crate::entry::IncomingItem;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Items to reconcile, in ingredient order, without explicit categories.
    pub fn incoming_items(&self) -> Vec<IncomingItem> {
        let provenance = self.name.trim();
        self.ingredients
            .iter()
            .map(|ingredient| {
                let item = IncomingItem::new(
                    ingredient.name.clone(),
                    ingredient.quantity,
                    ingredient.unit.clone(),
                );
                if provenance.is_empty() {
                    item
                } else {
                    item.with_provenance(provenance)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredients_carry_recipe_name() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "name": "Soupe de carottes",
                "ingredients": [
                    { "name": "Carotte", "quantity": 500, "unit": "g" },
                    { "name": "Oignon", "quantity": 1 }
                ]
            }"#,
        )
        .unwrap();

        let items = recipe.incoming_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Carotte");
        assert_eq!(items[0].unit, "g");
        assert_eq!(items[1].unit, "");
        assert!(
            items
                .iter()
                .all(|item| item.provenance.as_deref() == Some("Soupe de carottes"))
        );
        assert!(items.iter().all(|item| item.category.is_none()));
    }

    #[test]
    fn blank_recipe_name_sets_no_provenance() {
        let recipe = Recipe {
            name: "  ".into(),
            ingredients: vec![Ingredient {
                name: "Sel".into(),
                quantity: 1.0,
                unit: String::new(),
            }],
        };
        assert_eq!(recipe.incoming_items()[0].provenance, None);
    }
}
