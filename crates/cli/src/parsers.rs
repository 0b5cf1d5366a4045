use clap::ValueEnum;
use lookup::sort::SortSpec;
use thiserror::Error;

use crate::args::{SortKeyArg, SortOrderArg};

#[derive(Error, Debug, PartialEq, Eq)]
enum SortSpecParserError {
    #[error("Invalid format, expected '<KEY>' or '<KEY>:<ORDER>', e.g. 'PRICE:DESC'")]
    InvalidFormat,
    #[error("Invalid sort key: '{0}', expected one of: SUPPLIER, TYPE, DESCRIPTION, PARTNUMBER, PRICE, NOTES")]
    InvalidKey(String),
    #[error("Invalid sort order: '{0}', expected ASC or DESC")]
    InvalidOrder(String),
}

/// e.g. 'PRICE:DESC', 'supplier'.  The order defaults to ascending.
pub fn sort_spec_parser(s: &str) -> Result<SortSpec, String> {
    parse_sort_spec(s).map_err(|e| e.to_string())
}

fn parse_sort_spec(s: &str) -> Result<SortSpec, SortSpecParserError> {
    let (key_str, order_str) = match s.split_once(':') {
        Some((key_str, order_str)) => (key_str, Some(order_str)),
        None => (s, None),
    };

    if key_str.trim().is_empty() {
        return Err(SortSpecParserError::InvalidFormat);
    }

    let key = SortKeyArg::from_str(key_str.trim(), true)
        .map_err(|_| SortSpecParserError::InvalidKey(key_str.to_string()))?
        .to_sort_key();

    let order = match order_str {
        Some(order_str) => SortOrderArg::from_str(order_str.trim(), true)
            .map_err(|_| SortSpecParserError::InvalidOrder(order_str.to_string()))?
            .to_sort_order(),
        None => Default::default(),
    };

    Ok(SortSpec::new(key, order))
}
