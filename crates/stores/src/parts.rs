use std::path::Path;

use anyhow::{bail, Context};
use catalog::part::Part;
use catalog::price::Price;
use thiserror::Error;
use tracing::{debug, info, trace, Level};

use crate::csv::{PartsColumn, PartsHeaderMap};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PartsParseError {
    #[error("Missing headers: {}", .missing.join(", "))]
    MissingHeaders { missing: Vec<&'static str> },
    #[error("Unable to read CSV. reason: {reason}")]
    Malformed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedParts {
    pub parts: Vec<Part>,
    pub row_count: usize,
}

/// Parses a parts list, rows are kept in file order, duplicates included.
///
/// Header names are matched against synonyms, see [`PartsColumn::synonyms`].
pub fn parse_parts(text: &str) -> Result<ParsedParts, PartsParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = csv_reader
        .headers()
        .map_err(|error| PartsParseError::Malformed {
            reason: error.to_string(),
        })?
        .clone();

    let header_map = PartsHeaderMap::from_headers(&headers);
    debug!("Header map: {:?}", header_map);

    let missing = header_map.missing_required();
    if !missing.is_empty() {
        return Err(PartsParseError::MissingHeaders {
            missing,
        });
    }

    let mut parts: Vec<Part> = vec![];

    for result in csv_reader.records() {
        let record = result.map_err(|error| PartsParseError::Malformed {
            reason: error.to_string(),
        })?;

        trace!("{:?}", record);

        let field = |column: PartsColumn| header_map.field(&record, column).to_string();

        parts.push(Part::new(
            field(PartsColumn::Supplier),
            field(PartsColumn::Type),
            field(PartsColumn::Description),
            field(PartsColumn::PartNumber),
            Price::parse(header_map.field(&record, PartsColumn::Price)),
            field(PartsColumn::Notes),
        ));
    }

    let row_count = parts.len();
    info!("Parsed parts. rows: {}", row_count);

    Ok(ParsedParts {
        parts,
        row_count,
    })
}

/// Only '.csv' files are accepted, spreadsheets must be exported first.
#[tracing::instrument(level = Level::DEBUG)]
pub fn read_parts_csv(path: &Path) -> anyhow::Result<String> {
    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("Please choose a .csv file (not Excel .xlsx). file: {}", path.display());
    }

    info!("Reading parts. file: {}", path.display());

    std::fs::read_to_string(path).with_context(|| format!("Error reading parts. file: {}", path.display()))
}
