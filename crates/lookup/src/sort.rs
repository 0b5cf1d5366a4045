use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use catalog::part::Part;
use catalog::price::Price;
use lexical_sort::natural_lexical_cmp;
use util::sorting::SortOrder;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum SortKey {
    #[default]
    Supplier,
    Type,
    Description,
    PartNumber,
    Price,
    Notes,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortKey::Supplier => "SUPPLIER",
            SortKey::Type => "TYPE",
            SortKey::Description => "DESCRIPTION",
            SortKey::PartNumber => "PARTNUMBER",
            SortKey::Price => "PRICE",
            SortKey::Notes => "NOTES",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self {
            key,
            order,
        }
    }

    /// Selecting the current key flips the order, selecting a different key sorts ascending by it.
    pub fn toggle(&self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.order.reversed())
        } else {
            Self::new(key, SortOrder::Asc)
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.order)
    }
}

/// Case-insensitive, with runs of digits compared by value, e.g. 'item 9' < 'Item 10'.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    natural_lexical_cmp(&a.to_lowercase(), &b.to_lowercase())
}

fn compare_primary(a: &Part, b: &Part, spec: &SortSpec) -> Ordering {
    let text = |a: &str, b: &str| spec.order.apply(compare_text(a, b));

    match spec.key {
        SortKey::Supplier => text(&a.supplier, &b.supplier),
        SortKey::Type => text(&a.kind, &b.kind),
        SortKey::Description => text(&a.description, &b.description),
        SortKey::PartNumber => text(&a.part_number, &b.part_number),
        SortKey::Notes => text(&a.notes, &b.notes),
        SortKey::Price => match (a.price, b.price) {
            (Price::Value(a_value), Price::Value(b_value)) => spec.order.apply(a_value.cmp(&b_value)),
            // unset prices go last whichever way the list is sorted
            (Price::Unset, Price::Value(_)) => Ordering::Greater,
            (Price::Value(_), Price::Unset) => Ordering::Less,
            (Price::Unset, Price::Unset) => Ordering::Equal,
        },
    }
}

pub fn compare_parts(a: &Part, b: &Part, spec: &SortSpec) -> Ordering {
    compare_primary(a, b, spec)
        .then_with(|| spec.order.apply(compare_text(&a.supplier, &b.supplier)))
        .then_with(|| spec.order.apply(compare_text(&a.part_number, &b.part_number)))
        .then_with(|| spec.order.apply(compare_text(&a.description, &b.description)))
}

/// Stable, parts that compare equal keep their relative order.
pub fn sort_parts(parts: &mut [&Part], spec: &SortSpec) {
    parts.sort_by(|a, b| compare_parts(a, b, spec));
}
