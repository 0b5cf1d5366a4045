use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildCaseError {
    #[error("Hours must not be negative. field: {field}, value: {value}")]
    NegativeHours { field: &'static str, value: Decimal },
    #[error("Man hours are too large. hours: {hours}, travel_hours: {travel_hours}, techs: {techs}")]
    ManHoursOverflow {
        hours: Decimal,
        travel_hours: Decimal,
        techs: u32,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum RoutineVisit {
    Yes,
    No,
    #[default]
    Unset,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum WizardStep {
    #[default]
    Details,
    Labour,
    Review,
}

impl WizardStep {
    pub fn next(&self) -> Self {
        match self {
            WizardStep::Details => WizardStep::Labour,
            WizardStep::Labour | WizardStep::Review => WizardStep::Review,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            WizardStep::Details | WizardStep::Labour => WizardStep::Details,
            WizardStep::Review => WizardStep::Labour,
        }
    }

    /// 1-based
    pub fn number(&self) -> usize {
        match self {
            WizardStep::Details => 1,
            WizardStep::Labour => 2,
            WizardStep::Review => 3,
        }
    }
}

/// Labour for one time band, normal time or after hours.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct LabourBlock {
    pub hours: Decimal,
    pub techs: u32,
    pub travel_hours: Decimal,
}

impl LabourBlock {
    pub fn new(hours: Decimal, techs: u32, travel_hours: Decimal) -> Result<Self, BuildCaseError> {
        check_hours("hours", hours)?;
        check_hours("travel_hours", travel_hours)?;

        let block = Self {
            hours,
            techs,
            travel_hours,
        };
        block
            .checked_man_hours()
            .ok_or(BuildCaseError::ManHoursOverflow {
                hours,
                travel_hours,
                techs,
            })?;

        Ok(block)
    }

    /// Man-hours on site, zero unless both hours and techs are set.
    pub fn work_man_hours(&self) -> Decimal {
        man_hours(self.hours, self.techs).unwrap_or(Decimal::MAX)
    }

    pub fn travel_man_hours(&self) -> Decimal {
        man_hours(self.travel_hours, self.techs).unwrap_or(Decimal::MAX)
    }

    /// Work plus travel man-hours, `None` on overflow.
    fn checked_man_hours(&self) -> Option<Decimal> {
        man_hours(self.hours, self.techs)?.checked_add(man_hours(self.travel_hours, self.techs)?)
    }
}

fn man_hours(hours: Decimal, techs: u32) -> Option<Decimal> {
    if hours > Decimal::ZERO && techs > 0 {
        hours.checked_mul(Decimal::from(techs))
    } else {
        Some(Decimal::ZERO)
    }
}

fn check_hours(field: &'static str, value: Decimal) -> Result<(), BuildCaseError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BuildCaseError::NegativeHours {
            field,
            value,
        });
    }
    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BuildCase {
    pub customer_notes: String,
    /// `None` until filled from the quote or edited.
    pub estimator_notes: Option<String>,
    pub routine_visit: RoutineVisit,
    pub accommodation_nights: u32,
    pub normal_time: LabourBlock,
    pub after_hours: LabourBlock,
    pub step: WizardStep,
}

impl BuildCase {
    pub fn total_man_hours(&self) -> Decimal {
        checked_total_man_hours(&self.normal_time, &self.after_hours).unwrap_or(Decimal::MAX)
    }

    /// Applies all the changes, or none of them if any value is invalid.
    pub fn apply(&mut self, changes: BuildCaseChanges) -> Result<(), BuildCaseError> {
        let normal_time = changes
            .normal_time
            .apply_to(&self.normal_time, "nt")?;
        let after_hours = changes
            .after_hours
            .apply_to(&self.after_hours, "ah")?;
        checked_total_man_hours(&normal_time, &after_hours).ok_or(BuildCaseError::ManHoursOverflow {
            hours: after_hours.hours,
            travel_hours: after_hours.travel_hours,
            techs: after_hours.techs,
        })?;

        self.normal_time = normal_time;
        self.after_hours = after_hours;

        if let Some(customer_notes) = changes.customer_notes {
            self.customer_notes = customer_notes;
        }
        if let Some(estimator_notes) = changes.estimator_notes {
            self.estimator_notes = Some(estimator_notes);
        }
        if let Some(routine_visit) = changes.routine_visit {
            self.routine_visit = routine_visit;
        }
        if let Some(nights) = changes.accommodation_nights {
            self.accommodation_nights = nights;
        }

        Ok(())
    }
}

fn checked_total_man_hours(normal_time: &LabourBlock, after_hours: &LabourBlock) -> Option<Decimal> {
    normal_time
        .checked_man_hours()?
        .checked_add(after_hours.checked_man_hours()?)
}

/// Partial update of a [`BuildCase`], `None` leaves the current value unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BuildCaseChanges {
    pub customer_notes: Option<String>,
    pub estimator_notes: Option<String>,
    pub routine_visit: Option<RoutineVisit>,
    pub accommodation_nights: Option<u32>,
    pub normal_time: LabourChanges,
    pub after_hours: LabourChanges,
}

impl BuildCaseChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct LabourChanges {
    pub hours: Option<Decimal>,
    pub techs: Option<u32>,
    pub travel_hours: Option<Decimal>,
}

impl LabourChanges {
    fn apply_to(&self, block: &LabourBlock, prefix: &'static str) -> Result<LabourBlock, BuildCaseError> {
        let hours = self.hours.unwrap_or(block.hours);
        let travel_hours = self
            .travel_hours
            .unwrap_or(block.travel_hours);
        let techs = self.techs.unwrap_or(block.techs);

        LabourBlock::new(hours, techs, travel_hours).map_err(|error| match error {
            BuildCaseError::NegativeHours {
                field,
                value,
            } => BuildCaseError::NegativeHours {
                field: match (prefix, field) {
                    ("nt", "hours") => "nt_hours",
                    ("nt", _) => "nt_travel_hours",
                    (_, "hours") => "ah_hours",
                    _ => "ah_travel_hours",
                },
                value,
            },
            error => error,
        })
    }
}
