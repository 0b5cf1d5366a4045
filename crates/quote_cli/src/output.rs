use std::borrow::Cow;

use quote_app::config::Config;
use quote_app::{
    format_money, item_line, BuildCaseOverview, EmailDraft, ItemLineStyle, LabourBlock, MatchMode, PartsOverview,
    QuoteOverview, QuoteView, RoutineVisit,
};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Text printed for a view.
pub(crate) fn format_view(view: &QuoteView) -> String {
    match view {
        QuoteView::Parts(overview) => format_parts(overview),
        QuoteView::Quote(overview) => format_quote(overview),
        QuoteView::Text(text) => text.clone(),
        QuoteView::Emails(drafts) => format_emails(drafts),
        QuoteView::BuildCase(overview) => format_build_case(overview),
        QuoteView::Config(config) => format_config(config),
    }
}

/// The part of a view that goes to the clipboard, listings are never copied.
pub(crate) fn clipboard_text(view: &QuoteView) -> Option<String> {
    match view {
        QuoteView::Text(text) if !text.is_empty() => Some(text.clone()),
        QuoteView::Emails(drafts) if !drafts.is_empty() => Some(format_emails(drafts)),
        QuoteView::BuildCase(overview) if !overview.estimator_notes.is_empty() => {
            Some(overview.estimator_notes.clone())
        }
        _ => None,
    }
}

fn format_parts(overview: &PartsOverview) -> String {
    let mut lines = vec![];

    if let Some(source) = &overview.source {
        lines.push(format!(
            "Parts list: {}, {} parts, loaded {}",
            source.source,
            source.part_count,
            source
                .loaded_at
                .format("%Y-%m-%d %H:%M UTC")
        ));
    }

    if overview.parts.is_empty() {
        lines.push("No matching parts".to_string());
        return lines.join("\n");
    }

    let mode = match overview.mode {
        MatchMode::All | MatchMode::Exact => "",
        MatchMode::Fuzzy => ", similar matches",
    };
    lines.push(format!(
        "Showing {} of {} parts{}. sort: {}",
        overview.parts.len(),
        overview.total_parts,
        mode,
        overview.sort
    ));

    let highlighter = Highlighter::new(&overview.tokens);

    for (index, part) in overview.parts.iter().enumerate() {
        let mut row = format!(
            "{:>3}. {} | {} | {} | {} | {}",
            index + 1,
            highlighter.apply(&part.supplier),
            highlighter.apply(&part.kind),
            highlighter.apply(&part.description),
            highlighter.apply(&part.part_number),
            part.price
        );
        if !part.notes.is_empty() {
            row.push_str(&format!(" | {}", highlighter.apply(&part.notes)));
        }
        lines.push(row);
    }

    lines.join("\n")
}

/// Wraps case-insensitive occurrences of the search tokens in '[' and ']'.
struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    fn new(tokens: &[String]) -> Self {
        let alternatives = tokens
            .iter()
            .filter(|token| !token.is_empty())
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>();

        let pattern = match alternatives.is_empty() {
            true => None,
            false => RegexBuilder::new(&alternatives.join("|"))
                .case_insensitive(true)
                .build()
                .inspect_err(|error| debug!("Highlighting disabled. cause: {}", error))
                .ok(),
        };

        Self {
            pattern,
        }
    }

    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, "[$0]"),
            None => Cow::Borrowed(text),
        }
    }
}

fn format_quote(overview: &QuoteOverview) -> String {
    if overview.lines.is_empty() {
        return "The quote is empty".to_string();
    }

    let mut lines = overview
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            format!(
                "{:>3}. {} = {}",
                index + 1,
                item_line(line, ItemLineStyle::SupplierPrice),
                format_money(line.line_total())
            )
        })
        .collect::<Vec<_>>();

    lines.push(format!("Total: {}", format_money(overview.total)));
    lines.join("\n")
}

fn format_emails(drafts: &[EmailDraft]) -> String {
    drafts
        .iter()
        .map(|draft| format!("Subject: {}\n\n{}", draft.subject, draft.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_build_case(overview: &BuildCaseOverview) -> String {
    let build_case = &overview.build_case;

    let routine = match build_case.routine_visit {
        RoutineVisit::Yes => "yes",
        RoutineVisit::No => "no",
        RoutineVisit::Unset => "not set",
    };

    let labour = |name: &str, block: &LabourBlock| {
        format!(
            "{}: {} hours, {} techs, {} travel hours",
            name,
            block.hours.normalize(),
            block.techs,
            block.travel_hours.normalize()
        )
    };

    [
        format!("Step {} of 3", build_case.step.number()),
        format!("Customer notes: {}", build_case.customer_notes),
        format!("Routine visit: {}", routine),
        format!("Accommodation nights: {}", build_case.accommodation_nights),
        labour("Normal time", &build_case.normal_time),
        labour("After hours", &build_case.after_hours),
        format!("Total man hours: {}", build_case.total_man_hours().normalize()),
        String::new(),
        "Estimator notes:".to_string(),
        overview.estimator_notes.clone(),
    ]
    .join("\n")
}

fn format_config(config: &Config) -> String {
    format!(
        "Default job: {}\nDefault sort: {}",
        config
            .default_job
            .as_deref()
            .unwrap_or("none"),
        config.default_sort
    )
}
