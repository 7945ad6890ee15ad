//! Shopping-list reconciliation.
//!
//! The [`Engine`] decides, when items are added to a list, which ones are the
//! same thing as an open entry (and get their quantities summed) and which
//! ones are appended as new entries.
//!
//! ```rust
//! use engine::{Engine, IncomingItem};
//!
//! let engine = Engine::default();
//! let list = engine.reconcile(&[], &[IncomingItem::new("Carotte", 500.0, "g")]);
//! let list = engine.reconcile(&list, &[IncomingItem::new("carôtte", 500.0, "grammes")]);
//!
//! assert_eq!(list.len(), 1);
//! assert_eq!(list[0].quantity.as_deref(), Some("1000 g"));
//! assert_eq!(list[0].category, "Fruits et légumes");
//! ```

pub use categories::{CategoryRule, Classifier, DEFAULT_CATEGORY};
pub use config::EngineConfig;
pub use entry::{IncomingItem, ShoppingListEntry};
pub use error::EngineError;
pub use list::ShoppingList;
pub use quantity::{Amount, ParsedQuantity, Quantity};
pub use recipe::{Ingredient, Recipe};
pub use units::{
    CENTILITER, GRAM, KILOGRAM, LITER, MILLILITER, TABLESPOON, TEASPOON, UNIT, UnitTable,
};
pub use util::normalize_key;

mod categories;
mod config;
mod entry;
mod error;
mod list;
mod quantity;
mod recipe;
mod reconcile;
mod units;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Reconciliation engine.
///
/// Owns its unit table and classifier; both are immutable once built, so one
/// engine can serve any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    units: UnitTable,
    classifier: Classifier,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

/// The builder for `Engine`.
///
/// Unset parts fall back to the built-in French tables.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    units: Option<UnitTable>,
    extra_units: Vec<(String, String)>,
    rules: Option<Vec<CategoryRule>>,
    default_category: Option<String>,
}

impl EngineBuilder {
    /// Replace the whole unit table.
    pub fn units(mut self, units: UnitTable) -> EngineBuilder {
        self.units = Some(units);
        self
    }

    /// Add one synonym on top of the table.
    pub fn unit_synonym(
        mut self,
        synonym: impl Into<String>,
        canonical: impl Into<String>,
    ) -> EngineBuilder {
        self.extra_units.push((synonym.into(), canonical.into()));
        self
    }

    /// Replace the category rules.
    pub fn rules(mut self, rules: Vec<CategoryRule>) -> EngineBuilder {
        self.rules = Some(rules);
        self
    }

    pub fn default_category(mut self, category: impl Into<String>) -> EngineBuilder {
        self.default_category = Some(category.into());
        self
    }

    /// Apply a deserialized [`EngineConfig`].
    pub fn config(mut self, config: EngineConfig) -> EngineBuilder {
        if config.replace_units {
            self.units = Some(UnitTable::empty());
        }
        self.extra_units.extend(config.units);
        if let Some(rules) = config.categories {
            self.rules = Some(rules);
        }
        if let Some(category) = config.default_category {
            self.default_category = Some(category);
        }
        self
    }

    /// Construct `Engine`, validating the tables.
    pub fn build(self) -> ResultEngine<Engine> {
        let mut units = self.units.unwrap_or_default();
        units.extend(self.extra_units)?;

        let classifier = match (self.rules, self.default_category) {
            (None, None) => Classifier::default(),
            (rules, default_category) => Classifier::new(
                rules.unwrap_or_else(CategoryRule::builtin),
                default_category.as_deref().unwrap_or(DEFAULT_CATEGORY),
            )?,
        };

        tracing::debug!(
            "engine ready: {} unit synonyms, default category '{}'",
            units.len(),
            classifier.default_category()
        );
        Ok(Engine { units, classifier })
    }
}
