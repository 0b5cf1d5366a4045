use rust_decimal::Decimal;

use crate::build_case::{BuildCase, LabourBlock, RoutineVisit};
use crate::line::QuoteLine;
use crate::text::{item_line, ItemLineStyle};

/// Estimator notes for a build case, quote items followed by a blank line and the labour summary.
///
/// Labour lines are only added for blocks with both hours and techs.  Line order is normal time,
/// after hours, their travel, the labour total, accommodation and finally the routine visit line.
pub fn synthesize_estimator_notes(lines: &[QuoteLine], build_case: &BuildCase) -> String {
    let items_block = lines
        .iter()
        .map(|line| item_line(line, ItemLineStyle::SupplierPrice))
        .collect::<Vec<_>>();

    let labour_block = labour_lines(build_case);

    [items_block, labour_block]
        .into_iter()
        .filter(|block| !block.is_empty())
        .map(|block| block.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn labour_lines(build_case: &BuildCase) -> Vec<String> {
    let work = [
        (&build_case.normal_time, "NT"),
        (&build_case.after_hours, "AH"),
    ];

    let mut result = vec![];

    for (block, suffix) in work {
        if let Some(line) = labour_line(block.hours, block, suffix) {
            result.push(line);
        }
    }
    for (block, suffix) in work {
        if let Some(line) = labour_line(block.travel_hours, block, &format!("{} Travel", suffix)) {
            result.push(line);
        }
    }

    let total = build_case.total_man_hours();
    if total > Decimal::ZERO {
        result.push(format!("Total labour: {} hours", total.normalize()));
    }

    if build_case.accommodation_nights > 0 {
        result.push(format!(
            "{} x Overnight accommodation",
            build_case.accommodation_nights
        ));
    }

    result.push(
        match build_case.routine_visit {
            RoutineVisit::Yes => "Can be completed on routine visit",
            RoutineVisit::No | RoutineVisit::Unset => "Not intended to be completed on routine visit",
        }
        .to_string(),
    );

    result
}

fn labour_line(hours: Decimal, block: &LabourBlock, suffix: &str) -> Option<String> {
    if hours <= Decimal::ZERO || block.techs == 0 {
        return None;
    }

    let men = match block.techs {
        1 => "man",
        _ => "men",
    };

    Some(format!(
        "{} hours {} {} {}",
        hours.normalize(),
        block.techs,
        men,
        suffix
    ))
}
