//! Unit synonym table.
//!
//! Every written form of a unit maps to one canonical token per family.
//! Canonical tokens only decide whether two quantities can be summed; they
//! are never written back to an entry.

use std::collections::HashMap;

use crate::{EngineError, ResultEngine, util::normalize_key};

pub const GRAM: &str = "gram";
pub const KILOGRAM: &str = "kilogram";
pub const LITER: &str = "liter";
pub const CENTILITER: &str = "centiliter";
pub const MILLILITER: &str = "milliliter";
pub const TEASPOON: &str = "teaspoon";
pub const TABLESPOON: &str = "tablespoon";
pub const UNIT: &str = "unit";

const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    (GRAM, &["g", "gr", "grs", "gramme", "grammes", "gram", "grams"]),
    (
        KILOGRAM,
        &["kg", "kgs", "kilo", "kilos", "kilogramme", "kilogrammes", "kilogram", "kilograms"],
    ),
    (LITER, &["l", "litre", "litres", "liter", "liters"]),
    (CENTILITER, &["cl", "centilitre", "centilitres", "centiliter", "centiliters"]),
    (
        MILLILITER,
        &["ml", "millilitre", "millilitres", "milliliter", "milliliters"],
    ),
    (
        TEASPOON,
        &[
            "cac",
            "c. a c.",
            "c.a.c.",
            "c. a cafe",
            "cuillere a cafe",
            "cuilleres a cafe",
            "tsp",
            "teaspoon",
            "teaspoons",
        ],
    ),
    (
        TABLESPOON,
        &[
            "cas",
            "c. a s.",
            "c.a.s.",
            "c. a soupe",
            "cuillere a soupe",
            "cuilleres a soupe",
            "tbsp",
            "tablespoon",
            "tablespoons",
        ],
    ),
    (
        UNIT,
        &[
            "u", "unit", "units", "unite", "unites", "piece", "pieces", "pc", "pcs", "x",
        ],
    ),
];

/// Lookup table from unit synonym to canonical family token.
///
/// Keys are stored normalized (see [`normalize_key`]) so lookups ignore case,
/// accents and extra whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitTable {
    synonyms: HashMap<String, String>,
}

impl UnitTable {
    /// An empty table: every unit is its own family.
    pub fn empty() -> Self {
        Self {
            synonyms: HashMap::new(),
        }
    }

    /// Build a table from `(synonym, canonical)` pairs.
    ///
    /// Later pairs override earlier ones for the same normalized synonym.
    pub fn from_pairs<I, S, C>(pairs: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = Self::empty();
        table.extend(pairs)?;
        Ok(table)
    }

    /// Add or override synonyms.
    pub fn extend<I, S, C>(&mut self, pairs: I) -> ResultEngine<()>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        for (synonym, canonical) in pairs {
            let key = normalize_key(synonym.as_ref());
            let canonical = canonical.as_ref().trim();
            if key.is_empty() {
                return Err(EngineError::InvalidConfig(
                    "unit synonym must not be empty".to_string(),
                ));
            }
            if canonical.is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "canonical unit for '{key}' must not be empty"
                )));
            }
            self.synonyms.insert(key, canonical.to_string());
        }
        Ok(())
    }

    /// Canonical family token for `unit`.
    ///
    /// Unknown units are their own family: the normalized input is returned
    /// unchanged.
    pub fn canonical(&self, unit: &str) -> String {
        let key = normalize_key(unit);
        match self.synonyms.get(&key) {
            Some(canonical) => canonical.clone(),
            None => {
                tracing::trace!("unknown unit '{unit}', keeping it as its own family");
                key
            }
        }
    }

    /// Returns `true` when both units belong to the same family.
    pub fn same_family(&self, left: &str, right: &str) -> bool {
        self.canonical(left) == self.canonical(right)
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}

impl Default for UnitTable {
    /// French and English kitchen units. A bare count ("3") is in the
    /// [`UNIT`] family.
    fn default() -> Self {
        let synonyms = BUILTIN_SYNONYMS
            .iter()
            .flat_map(|(canonical, synonyms)| {
                synonyms
                    .iter()
                    .map(move |synonym| (normalize_key(synonym), canonical.to_string()))
            })
            .chain([(String::new(), UNIT.to_string())])
            .collect();
        Self { synonyms }
    }
}
