use csv::StringRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartsColumn {
    Supplier,
    Type,
    Description,
    PartNumber,
    Price,
    Notes,
}

impl PartsColumn {
    pub const REQUIRED: [PartsColumn; 4] = [
        PartsColumn::Supplier,
        PartsColumn::Description,
        PartsColumn::PartNumber,
        PartsColumn::Price,
    ];

    /// Accepted header names, compared case-insensitively.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            PartsColumn::Supplier => &["SUPPLIER", "VENDOR"],
            PartsColumn::Type => &["TYPE", "CATEGORY"],
            PartsColumn::Description => &["DESCRIPTION", "DESC", "ITEM"],
            PartsColumn::PartNumber => &["PARTNUMBER", "PART NUMBER", "PART_NUMBER", "PART NO", "PARTNO", "SKU", "CODE"],
            PartsColumn::Price => &["PRICE", "COST", "UNIT PRICE"],
            PartsColumn::Notes => &["NOTES", "NOTE", "COMMENTS"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PartsColumn::Supplier => "supplier",
            PartsColumn::Type => "type",
            PartsColumn::Description => "description",
            PartsColumn::PartNumber => "partnumber",
            PartsColumn::Price => "price",
            PartsColumn::Notes => "notes",
        }
    }
}

/// Column indexes of a parts list, `None` when the header row has no matching column.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartsHeaderMap {
    pub supplier: Option<usize>,
    pub kind: Option<usize>,
    pub description: Option<usize>,
    pub part_number: Option<usize>,
    pub price: Option<usize>,
    pub notes: Option<usize>,
}

impl PartsHeaderMap {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| {
                header
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_uppercase()
            })
            .collect();

        // the first column with any of the synonyms wins
        let find = |column: PartsColumn| {
            normalized
                .iter()
                .position(|header| column.synonyms().contains(&header.as_str()))
        };

        Self {
            supplier: find(PartsColumn::Supplier),
            kind: find(PartsColumn::Type),
            description: find(PartsColumn::Description),
            part_number: find(PartsColumn::PartNumber),
            price: find(PartsColumn::Price),
            notes: find(PartsColumn::Notes),
        }
    }

    pub fn index(&self, column: PartsColumn) -> Option<usize> {
        match column {
            PartsColumn::Supplier => self.supplier,
            PartsColumn::Type => self.kind,
            PartsColumn::Description => self.description,
            PartsColumn::PartNumber => self.part_number,
            PartsColumn::Price => self.price,
            PartsColumn::Notes => self.notes,
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        PartsColumn::REQUIRED
            .iter()
            .filter(|column| self.index(**column).is_none())
            .map(PartsColumn::name)
            .collect()
    }

    /// Trimmed value, empty when the column is absent or the row is short.
    pub fn field<'record>(&self, record: &'record StringRecord, column: PartsColumn) -> &'record str {
        self.index(column)
            .and_then(|index| record.get(index))
            .map(str::trim)
            .unwrap_or_default()
    }
}
