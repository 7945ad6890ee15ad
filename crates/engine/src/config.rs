//! Engine configuration as data.
//!
//! Everything here is optional: a missing field keeps the built-in French
//! tables. The struct deserializes from the `[engine]` table of the settings
//! file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::categories::CategoryRule;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bucket for names no rule matches.
    pub default_category: Option<String>,
    /// Synonym to canonical unit. Merged over the built-in table unless
    /// `replace_units` is set.
    pub units: BTreeMap<String, String>,
    pub replace_units: bool,
    /// Ordered rules. When present they replace the built-in rules.
    pub categories: Option<Vec<CategoryRule>>,
}
