use catalog::supplier::SupplierKey;
use indexmap::IndexMap;

use crate::line::QuoteLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierGroup {
    pub key: SupplierKey,
    pub lines: Vec<QuoteLine>,
}

impl SupplierGroup {
    pub fn label(&self) -> &str {
        &self.key.label
    }
}

/// Groups are in order of the first line of each supplier, lines keep their quote order.
pub fn group_by_supplier(lines: &[QuoteLine]) -> Vec<SupplierGroup> {
    let mut groups: IndexMap<SupplierKey, Vec<QuoteLine>> = IndexMap::new();

    for line in lines {
        groups
            .entry(line.supplier_key())
            .or_default()
            .push(line.clone());
    }

    groups
        .into_iter()
        .map(|(key, lines)| SupplierGroup {
            key,
            lines,
        })
        .collect()
}
