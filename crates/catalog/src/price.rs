use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// A parts list price.
///
/// `Unset` is used when the source value could not be read as a number, it is never treated as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Price {
    Value(Decimal),
    #[default]
    Unset,
}

impl Price {
    /// Lenient price parsing, e.g. '$1,234.50', '12,5', ' 9.99 ex GST'.
    ///
    /// Everything except digits, ',', '.' and '-' is discarded.  When a '.' is present any ','
    /// is a thousands separator, otherwise the first ',' is the decimal separator.  The longest
    /// leading number is then used, anything after it is ignored.
    pub fn parse(raw: &str) -> Self {
        let filtered: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
            .collect();

        let normalized = if filtered.contains('.') {
            filtered.replace(',', "")
        } else {
            filtered.replacen(',', ".", 1)
        };

        leading_number(&normalized)
            .and_then(|number| Decimal::from_str(&number).ok())
            .map_or(Price::Unset, Price::Value)
    }
}

impl Display for Price {
    /// Unset prices display as an empty string.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Value(value) => f.write_str(&format_money(*value)),
            Price::Unset => Ok(()),
        }
    }
}

/// Currency formatting used everywhere a price is shown, always two decimal places, e.g. '$28.47'.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

/// Same rules as javascript's `parseFloat` for the characters that can remain after filtering.
fn leading_number(value: &str) -> Option<String> {
    let mut chars = value.chars().peekable();

    let mut sign = "";
    if chars.peek() == Some(&'-') {
        sign = "-";
        chars.next();
    }

    let mut integer_digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        integer_digits.push(c);
    }

    let mut fraction_digits = String::new();
    if chars.next_if_eq(&'.').is_some() {
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            fraction_digits.push(c);
        }
    }

    match (integer_digits.is_empty(), fraction_digits.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!("{}{}", sign, integer_digits)),
        (true, false) => Some(format!("{}0.{}", sign, fraction_digits)),
        (false, false) => Some(format!("{}{}.{}", sign, integer_digits, fraction_digits)),
    }
}

#[cfg(test)]
mod parse_tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use crate::price::Price;

    #[rstest]
    #[case("12.50", Price::Value(dec!(12.50)))]
    #[case("$12.50", Price::Value(dec!(12.50)))]
    #[case(" $ 1,234.56 ", Price::Value(dec!(1234.56)))]
    #[case("12,5", Price::Value(dec!(12.5)))]
    #[case("9.99 ex GST", Price::Value(dec!(9.99)))]
    #[case("-3", Price::Value(dec!(-3)))]
    #[case(".5", Price::Value(dec!(0.5)))]
    #[case("12.", Price::Value(dec!(12)))]
    #[case("1-2", Price::Value(dec!(1)))]
    #[case("0", Price::Value(dec!(0)))]
    #[case("", Price::Unset)]
    #[case("N/A", Price::Unset)]
    #[case("POA", Price::Unset)]
    #[case("-", Price::Unset)]
    #[case(".", Price::Unset)]
    fn parse(#[case] raw: &str, #[case] expected_result: Price) {
        assert_eq!(Price::parse(raw), expected_result);
    }

    #[test]
    fn unset_is_not_zero() {
        assert_ne!(Price::parse("TBA"), Price::Value(dec!(0)));
    }
}
