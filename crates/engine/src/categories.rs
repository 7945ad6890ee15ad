//! Keyword categorization.
//!
//! Rules are evaluated top to bottom against the normalized item name; the
//! first rule whose pattern is a substring of the name wins.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine,
    util::{normalize_key, normalize_optional_text},
};

pub const DEFAULT_CATEGORY: &str = "Divers";

const FRUITS_VEGETABLES: &str = "Fruits et légumes";
const DAIRY: &str = "Produits laitiers";
const BUTCHER: &str = "Boucherie";
const FISHMONGER: &str = "Poissonnerie";
const BAKERY: &str = "Boulangerie";
const GROCERY: &str = "Épicerie";
const DRINKS: &str = "Boissons";
const FROZEN: &str = "Surgelés";

// Longer patterns sit above the shorter ones they contain
// ("pomme de terre" before "pomme", "bœuf" before "œuf", "laitue" before "lait").
const BUILTIN_RULES: &[(&str, &str)] = &[
    ("sucre glace", GROCERY),
    ("the glace", DRINKS),
    ("surgele", FROZEN),
    ("creme glacee", FROZEN),
    ("glace", FROZEN),
    ("pomme de terre", FRUITS_VEGETABLES),
    ("pommes de terre", FRUITS_VEGETABLES),
    ("carotte", FRUITS_VEGETABLES),
    ("tomate", FRUITS_VEGETABLES),
    ("oignon", FRUITS_VEGETABLES),
    ("echalote", FRUITS_VEGETABLES),
    ("poireau", FRUITS_VEGETABLES),
    ("courgette", FRUITS_VEGETABLES),
    ("aubergine", FRUITS_VEGETABLES),
    ("poivron", FRUITS_VEGETABLES),
    ("salade", FRUITS_VEGETABLES),
    ("laitue", FRUITS_VEGETABLES),
    ("epinard", FRUITS_VEGETABLES),
    ("champignon", FRUITS_VEGETABLES),
    ("persil", FRUITS_VEGETABLES),
    ("basilic", FRUITS_VEGETABLES),
    ("pomme", FRUITS_VEGETABLES),
    ("poire", FRUITS_VEGETABLES),
    ("banane", FRUITS_VEGETABLES),
    ("citron", FRUITS_VEGETABLES),
    ("orange", FRUITS_VEGETABLES),
    ("fraise", FRUITS_VEGETABLES),
    ("lait", DAIRY),
    ("beurre", DAIRY),
    ("fromage", DAIRY),
    ("yaourt", DAIRY),
    ("creme", DAIRY),
    ("gruyere", DAIRY),
    ("parmesan", DAIRY),
    ("mozzarella", DAIRY),
    ("boeuf", BUTCHER),
    ("bœuf", BUTCHER),
    ("oeuf", DAIRY),
    ("œuf", DAIRY),
    ("poulet", BUTCHER),
    ("veau", BUTCHER),
    ("porc", BUTCHER),
    ("agneau", BUTCHER),
    ("jambon", BUTCHER),
    ("lardon", BUTCHER),
    ("saucisse", BUTCHER),
    ("viande", BUTCHER),
    ("saumon", FISHMONGER),
    ("thon", FISHMONGER),
    ("cabillaud", FISHMONGER),
    ("crevette", FISHMONGER),
    ("poisson", FISHMONGER),
    ("baguette", BAKERY),
    ("pain", BAKERY),
    ("brioche", BAKERY),
    ("croissant", BAKERY),
    ("farine", GROCERY),
    ("riz", GROCERY),
    ("pates", GROCERY),
    ("huile", GROCERY),
    ("vinaigre", GROCERY),
    ("moutarde", GROCERY),
    ("epice", GROCERY),
    ("conserve", GROCERY),
    ("eau minerale", DRINKS),
    ("eau gazeuse", DRINKS),
    ("jus", DRINKS),
    ("vin", DRINKS),
    ("biere", DRINKS),
    ("cafe", DRINKS),
];

/// One `(pattern, category)` classification rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub pattern: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(pattern: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }

    /// The built-in French rule list.
    pub fn builtin() -> Vec<CategoryRule> {
        BUILTIN_RULES
            .iter()
            .map(|(pattern, category)| CategoryRule::new(*pattern, *category))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct CompiledRule {
    pattern_norm: String,
    category: String,
}

/// Ordered keyword classifier with a fallback bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
    default_category: String,
}

impl Classifier {
    pub fn new(rules: Vec<CategoryRule>, default_category: &str) -> ResultEngine<Self> {
        let default_category = default_category.trim();
        if default_category.is_empty() {
            return Err(EngineError::InvalidConfig(
                "default category must not be empty".to_string(),
            ));
        }

        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(idx, rule)| {
                let pattern_norm = normalize_key(&rule.pattern);
                let category = rule.category.trim();
                if pattern_norm.is_empty() {
                    return Err(EngineError::InvalidConfig(format!(
                        "category rule #{idx} has an empty pattern"
                    )));
                }
                if category.is_empty() {
                    return Err(EngineError::InvalidConfig(format!(
                        "category rule '{}' has an empty category",
                        rule.pattern
                    )));
                }
                Ok(CompiledRule {
                    pattern_norm,
                    category: category.to_string(),
                })
            })
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(Self {
            rules,
            default_category: default_category.to_string(),
        })
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Category for an item name, falling back to the default bucket.
    pub fn classify(&self, name: &str) -> &str {
        let name_norm = normalize_key(name);
        self.classify_normalized(&name_norm)
    }

    pub(crate) fn classify_normalized(&self, name_norm: &str) -> &str {
        match self
            .rules
            .iter()
            .find(|rule| name_norm.contains(&rule.pattern_norm))
        {
            Some(rule) => &rule.category,
            None => {
                tracing::trace!(
                    "no category rule for '{name_norm}', using '{}'",
                    self.default_category
                );
                &self.default_category
            }
        }
    }

    /// Explicit category when given and non-blank, otherwise the classifier.
    pub fn resolve(&self, explicit: Option<&str>, name: &str) -> String {
        self.resolve_normalized(explicit, &normalize_key(name))
    }

    pub(crate) fn resolve_normalized(&self, explicit: Option<&str>, name_norm: &str) -> String {
        match normalize_optional_text(explicit) {
            Some(category) => category,
            None => self.classify_normalized(name_norm).to_string(),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(pattern, category)| CompiledRule {
                pattern_norm: normalize_key(pattern),
                category: category.to_string(),
            })
            .collect();
        Self {
            rules,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}
