use catalog::part::Part;
use catalog::price::Price;
use catalog::supplier::SupplierKey;
use rust_decimal::Decimal;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct QuoteLine {
    pub supplier: String,
    pub description: String,
    pub part_number: String,
    pub price: Decimal,
    pub qty: u32,
}

impl QuoteLine {
    pub fn new(supplier: String, description: String, part_number: String, price: Decimal, qty: u32) -> Self {
        Self {
            supplier,
            description,
            part_number,
            price,
            qty: qty.max(1),
        }
    }

    /// A line for a single unit of the part, parts without a price are quoted at zero.
    pub fn from_part(part: &Part) -> Self {
        let price = match part.price {
            Price::Value(value) => value,
            Price::Unset => {
                warn!(
                    "Part has no price, quoting at zero. supplier: '{}', part_number: '{}'",
                    part.supplier, part.part_number
                );
                Decimal::ZERO
            }
        };

        Self::new(
            part.supplier.clone(),
            part.description.clone(),
            part.part_number.clone(),
            price,
            1,
        )
    }

    /// `None` when price times quantity is too large for a `Decimal`.
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price
            .checked_mul(Decimal::from(self.qty))
    }

    pub fn line_total(&self) -> Decimal {
        self.price
            .saturating_mul(Decimal::from(self.qty))
    }

    pub fn supplier_key(&self) -> SupplierKey {
        SupplierKey::normalize(&self.supplier)
    }

    /// Same supplier, description, part number and price, the quantity is ignored.
    pub fn is_same_item(&self, other: &QuoteLine) -> bool {
        self.supplier == other.supplier
            && self.description == other.description
            && self.part_number == other.part_number
            && self.price == other.price
    }
}

/// Sum of the line totals, `None` on overflow.
pub fn checked_total<'a>(lines: impl IntoIterator<Item = &'a QuoteLine>) -> Option<Decimal> {
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.checked_line_total()?))
}

/// Sum of the line totals, saturating at `Decimal::MAX`.
pub fn total<'a>(lines: impl IntoIterator<Item = &'a QuoteLine>) -> Decimal {
    lines
        .into_iter()
        .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total()))
}

/// Raw values for a line entered by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ManualLine {
    pub supplier: String,
    pub description: String,
    pub part_number: String,
    pub price: String,
    pub qty: i64,
}

#[cfg(test)]
mod quote_line_tests {
    use catalog::part::Part;
    use catalog::price::Price;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::line::{checked_total, total, QuoteLine};

    #[test]
    fn from_part() {
        // given
        let part = Part {
            supplier: "Haymans 2025".to_string(),
            description: "Gate Valve".to_string(),
            part_number: "GV25".to_string(),
            price: Price::Value(dec!(12.50)),
            ..Part::default()
        };

        // when
        let line = QuoteLine::from_part(&part);

        // then
        assert_eq!(
            line,
            QuoteLine::new(
                "Haymans 2025".to_string(),
                "Gate Valve".to_string(),
                "GV25".to_string(),
                dec!(12.50),
                1
            )
        );
        assert_eq!(line.supplier_key().key, "HAYMANS");
    }

    #[test]
    fn unset_price_is_quoted_at_zero() {
        // when
        let line = QuoteLine::from_part(&Part::default());

        // then
        assert_eq!(line.price, Decimal::ZERO);
    }

    #[test]
    fn line_total() {
        // given
        let line = QuoteLine::new("A".to_string(), "B".to_string(), "C".to_string(), dec!(0.99), 3);

        // expect
        assert_eq!(line.line_total(), dec!(2.97));
        assert_eq!(line.checked_line_total(), Some(dec!(2.97)));
    }

    #[test]
    fn line_total_too_large() {
        // given
        let line = QuoteLine::new("A".to_string(), "B".to_string(), "C".to_string(), Decimal::MAX, 2);
        let other_line = QuoteLine::new("A".to_string(), "D".to_string(), "E".to_string(), Decimal::MAX, 1);

        // expect
        assert_eq!(line.checked_line_total(), None);
        assert_eq!(line.line_total(), Decimal::MAX);
        assert_eq!(checked_total([&other_line, &other_line]), None);
        assert_eq!(total([&line, &other_line]), Decimal::MAX);
    }
}
