use catalog::part::Part;
use catalog::price::Price;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::line::{checked_total, total, ManualLine, QuoteLine};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuoteError {
    /// Messages show 1-based line numbers.
    #[error("Invalid line number. line: {}, lines: {count}", .index + 1)]
    InvalidIndex { index: usize, count: usize },
    #[error("Invalid line. reason: {reason}")]
    Validation { reason: String },
    #[error("The line changed since removal was requested. line: {}", .index + 1)]
    StaleRemoval { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Appended(usize),
    /// An identical line was already present, its quantity was incremented.
    Merged(usize),
}

impl AddOutcome {
    pub fn index(&self) -> usize {
        match self {
            AddOutcome::Appended(index) | AddOutcome::Merged(index) => *index,
        }
    }
}

/// Obtained from [`Quote::prepare_removal`], consumed by [`Quote::confirm_removal`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PendingRemoval {
    pub index: usize,
    pub line: QuoteLine,
}

/// The ordered list of lines being quoted.
///
/// Serializes as a plain list of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Quote {
    lines: Vec<QuoteLine>,
}

impl Quote {
    pub fn from_lines(lines: Vec<QuoteLine>) -> Self {
        Self {
            lines,
        }
    }

    pub fn lines(&self) -> &[QuoteLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn add_from_part(&mut self, part: &Part) -> Result<AddOutcome, QuoteError> {
        let candidate = QuoteLine::from_part(part);

        let existing = self
            .lines
            .iter()
            .position(|line| line.is_same_item(&candidate));

        let outcome = match existing {
            Some(index) => {
                let mut merged = self.lines[index].clone();
                merged.qty = merged.qty.saturating_add(1);
                self.check_total(Some(index), &merged)?;

                self.lines[index] = merged;
                AddOutcome::Merged(index)
            }
            None => {
                self.check_total(None, &candidate)?;

                self.lines.push(candidate);
                AddOutcome::Appended(self.lines.len() - 1)
            }
        };

        info!(
            "Added part to quote. part_number: '{}', outcome: {:?}",
            part.part_number, outcome
        );

        Ok(outcome)
    }

    /// Manual lines are always appended, even when an identical line exists.
    pub fn add_manual(&mut self, manual: ManualLine) -> Result<usize, QuoteError> {
        let line = Self::validate_manual(manual)?;
        self.check_total(None, &line)?;
        info!("Added manual line to quote. part_number: '{}'", line.part_number);
        self.lines.push(line);

        Ok(self.lines.len() - 1)
    }

    fn validate_manual(manual: ManualLine) -> Result<QuoteLine, QuoteError> {
        let required = [
            ("supplier", &manual.supplier),
            ("description", &manual.description),
            ("part number", &manual.part_number),
        ];
        if let Some((name, _)) = required
            .iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(QuoteError::Validation {
                reason: format!("{} is required", name),
            });
        }

        let price = match Price::parse(&manual.price) {
            Price::Value(value) if value >= Decimal::ZERO => value,
            _ => {
                return Err(QuoteError::Validation {
                    reason: format!("price must be a number of zero or more, found: '{}'", manual.price),
                })
            }
        };

        Ok(QuoteLine::new(
            manual.supplier.trim().to_string(),
            manual.description.trim().to_string(),
            manual.part_number.trim().to_string(),
            price,
            clamp_qty(manual.qty),
        ))
    }

    pub fn set_qty(&mut self, index: usize, value: i64) -> Result<u32, QuoteError> {
        let mut line = self
            .lines
            .get(index)
            .ok_or(QuoteError::InvalidIndex {
                index,
                count: self.lines.len(),
            })?
            .clone();

        line.qty = clamp_qty(value);
        self.check_total(Some(index), &line)?;

        let qty = line.qty;
        self.lines[index] = line;
        debug!("Quantity updated. index: {}, qty: {}", index, qty);

        Ok(qty)
    }

    /// Rejects a change that would make the quote total too large for a `Decimal`.
    ///
    /// `index` is the line being replaced by `candidate`, `None` when appending.
    fn check_total(&self, index: Option<usize>, candidate: &QuoteLine) -> Result<(), QuoteError> {
        let others = self
            .lines
            .iter()
            .enumerate()
            .filter(|(line_index, _)| Some(*line_index) != index)
            .map(|(_, line)| line);

        match checked_total(others.chain([candidate])) {
            Some(_) => Ok(()),
            None => Err(QuoteError::Validation {
                reason: format!(
                    "the quote total would be too large. part_number: '{}', qty: {}",
                    candidate.part_number, candidate.qty
                ),
            }),
        }
    }

    pub fn prepare_removal(&self, index: usize) -> Result<PendingRemoval, QuoteError> {
        let line = self
            .lines
            .get(index)
            .ok_or(QuoteError::InvalidIndex {
                index,
                count: self.lines.len(),
            })?;

        Ok(PendingRemoval {
            index,
            line: line.clone(),
        })
    }

    pub fn confirm_removal(&mut self, pending: PendingRemoval) -> Result<QuoteLine, QuoteError> {
        match self.lines.get(pending.index) {
            Some(line) if *line == pending.line => {
                let removed = self.lines.remove(pending.index);
                info!("Removed line from quote. part_number: '{}'", removed.part_number);
                Ok(removed)
            }
            Some(_) => Err(QuoteError::StaleRemoval {
                index: pending.index,
            }),
            None => Err(QuoteError::InvalidIndex {
                index: pending.index,
                count: self.lines.len(),
            }),
        }
    }

    pub fn total(&self) -> Decimal {
        total(&self.lines)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

fn clamp_qty(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}
