use crate::price::Price;

/// A single row of a supplier parts list.
///
/// Parts have no identity of their own, two rows with the same values are still two parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Part {
    pub supplier: String,
    /// The 'TYPE' column, e.g. 'Valve', 'Detector'.
    pub kind: String,
    pub description: String,
    pub part_number: String,
    pub price: Price,
    pub notes: String,
}

impl Part {
    pub fn new(supplier: String, kind: String, description: String, part_number: String, price: Price, notes: String) -> Self {
        Self {
            supplier,
            kind,
            description,
            part_number,
            price,
            notes,
        }
    }

    /// Text used when a single row is copied, e.g. 'Haymans — Gate Valve 25mm — GV25 — $12.50 each'
    pub fn copy_text(&self) -> String {
        let price_text = match self.price {
            Price::Value(_) => format!("{} each", self.price),
            Price::Unset => String::new(),
        };

        format!(
            "{} — {} — {} — {}",
            self.supplier, self.description, self.part_number, price_text
        )
        .trim()
        .to_string()
    }
}

#[cfg(feature = "testing")]
impl Default for Part {
    fn default() -> Self {
        Self {
            supplier: "Default Supplier".to_string(),
            kind: "".to_string(),
            description: "Default Description".to_string(),
            part_number: "DEFAULT-1".to_string(),
            price: Price::Unset,
            notes: "".to_string(),
        }
    }
}
