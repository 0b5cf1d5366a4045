use clap::ValueEnum;
use lookup::sort::SortKey;
use quoting::build_case::RoutineVisit;
use quoting::text::ItemLineStyle;
use util::sorting::SortOrder;

/// Args decouple of CLI arg handling requirements from the internal data structures

#[derive(Debug, Clone)]
#[derive(ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrderArg {
    Asc,
    Desc,
}

impl SortOrderArg {
    pub fn to_sort_order(&self) -> SortOrder {
        match self {
            SortOrderArg::Asc => SortOrder::Asc,
            SortOrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone)]
#[derive(ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKeyArg {
    Supplier,
    Type,
    Description,
    #[value(name("PARTNUMBER"))]
    PartNumber,
    Price,
    Notes,
}

impl SortKeyArg {
    pub fn to_sort_key(&self) -> SortKey {
        match self {
            SortKeyArg::Supplier => SortKey::Supplier,
            SortKeyArg::Type => SortKey::Type,
            SortKeyArg::Description => SortKey::Description,
            SortKeyArg::PartNumber => SortKey::PartNumber,
            SortKeyArg::Price => SortKey::Price,
            SortKeyArg::Notes => SortKey::Notes,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
#[value(rename_all = "kebab-case")]
pub enum ItemLineStyleArg {
    Plain,
    SupplierPrice,
    SupplierPriceList,
}

impl From<ItemLineStyleArg> for ItemLineStyle {
    fn from(value: ItemLineStyleArg) -> Self {
        match value {
            ItemLineStyleArg::Plain => Self::Plain,
            ItemLineStyleArg::SupplierPrice => Self::SupplierPrice,
            ItemLineStyleArg::SupplierPriceList => Self::SupplierPriceList,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
#[value(rename_all = "lower")]
pub enum RoutineVisitArg {
    Yes,
    No,
    Unset,
}

impl From<RoutineVisitArg> for RoutineVisit {
    fn from(value: RoutineVisitArg) -> Self {
        match value {
            RoutineVisitArg::Yes => Self::Yes,
            RoutineVisitArg::No => Self::No,
            RoutineVisitArg::Unset => Self::Unset,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
#[value(rename_all = "lower")]
pub enum StepDirectionArg {
    Next,
    Previous,
}
