use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;

static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("valid year pattern"));
static ALPHABETIC_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid alphabetic pattern"));

const UNKNOWN_KEY: &str = "UNKNOWN";
const UNKNOWN_LABEL: &str = "Supplier";

/// Supplier families whose purchase orders must name a specific store.
const STORE_REQUIRED_KEYS: [&str; 1] = ["HAYMANS"];

/// Grouping key for supplier names, e.g. 'Haymans 2025 Store' and 'HAYMANS' both have the key 'HAYMANS'.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SupplierKey {
    pub key: String,
    pub label: String,
}

impl SupplierKey {
    pub fn normalize(supplier: &str) -> Self {
        let without_years = YEAR_PATTERN.replace_all(supplier, " ");

        let key = ALPHABETIC_RUN_PATTERN
            .find(&without_years)
            .map(|run| run.as_str().to_uppercase())
            .unwrap_or_else(|| UNKNOWN_KEY.to_string());

        let label = Self::build_label(&key);

        Self {
            key,
            label,
        }
    }

    fn build_label(key: &str) -> String {
        if key == UNKNOWN_KEY {
            return UNKNOWN_LABEL.to_string();
        }

        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => UNKNOWN_LABEL.to_string(),
        }
    }

    /// True when a store identifier must be supplied before a purchase order email can be generated.
    pub fn requires_store(&self) -> bool {
        STORE_REQUIRED_KEYS.contains(&self.key.as_str())
    }
}

impl Display for SupplierKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
