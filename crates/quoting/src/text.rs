use catalog::price::format_money;
use thiserror::Error;

use crate::group::{group_by_supplier, SupplierGroup};
use crate::line::{total, QuoteLine};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuoteTextError {
    #[error("The quote is empty")]
    EmptyQuote,
    #[error("A store is required for purchase orders from this supplier. supplier: {supplier}")]
    MissingStore { supplier: String },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ItemLineStyle {
    #[default]
    Plain,
    /// Suffixed with e.g. '(Haymans price)'
    SupplierPrice,
    /// Suffixed with e.g. '(Haymans price list)'
    SupplierPriceList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

pub fn item_line(line: &QuoteLine, style: ItemLineStyle) -> String {
    let plain = format!(
        "{} x {} — {} — {} each",
        line.qty,
        line.description,
        line.part_number,
        format_money(line.price)
    );

    match style {
        ItemLineStyle::Plain => plain,
        ItemLineStyle::SupplierPrice => format!("{} ({} price)", plain, line.supplier_key().label),
        ItemLineStyle::SupplierPriceList => format!("{} ({} price list)", plain, line.supplier_key().label),
    }
}

fn item_lines(lines: &[QuoteLine], style: ItemLineStyle) -> String {
    lines
        .iter()
        .map(|line| item_line(line, style))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Blank job numbers are treated as absent.
fn job_number(job: Option<&str>) -> Option<&str> {
    job.map(str::trim)
        .filter(|job| !job.is_empty())
}

/// An empty quote has no text.
pub fn quote_text(lines: &[QuoteLine], style: ItemLineStyle) -> String {
    if lines.is_empty() {
        return String::new();
    }

    format!(
        "{}\n\nTotal: {}",
        item_lines(lines, style),
        format_money(total(lines))
    )
}

fn purchase_order_header(label: &str, job: Option<&str>) -> String {
    match job_number(job) {
        Some(job) => format!("Please forward a PO to {} for job {}", label, job),
        None => format!("Please forward a PO to {} for this job", label),
    }
}

/// One block per supplier group, separated by a blank line.
pub fn purchase_order_text(lines: &[QuoteLine], job: Option<&str>) -> String {
    group_by_supplier(lines)
        .iter()
        .map(|group| {
            format!(
                "{}\n{}",
                purchase_order_header(group.label(), job),
                item_lines(&group.lines, ItemLineStyle::SupplierPriceList)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Groups that require a store are addressed to '{label} {store}', without a store no draft is made.
pub fn purchase_order_email(
    group: &SupplierGroup,
    job: Option<&str>,
    store: Option<&str>,
) -> Result<EmailDraft, QuoteTextError> {
    if group.lines.is_empty() {
        return Err(QuoteTextError::EmptyQuote);
    }

    let label = if group.key.requires_store() {
        let store = store
            .map(str::trim)
            .filter(|store| !store.is_empty())
            .ok_or_else(|| QuoteTextError::MissingStore {
                supplier: group.label().to_string(),
            })?;
        format!("{} {}", group.label(), store)
    } else {
        group.label().to_string()
    };

    let subject = match job_number(job) {
        Some(job) => format!("PO request - {} - job {}", label, job),
        None => format!("PO request - {}", label),
    };

    let body = format!(
        "Hi,\n\n{}\n{}\n\nThanks",
        purchase_order_header(&label, job),
        item_lines(&group.lines, ItemLineStyle::SupplierPriceList)
    );

    Ok(EmailDraft {
        subject,
        body,
    })
}

pub fn quote_email(lines: &[QuoteLine], job: Option<&str>) -> Result<EmailDraft, QuoteTextError> {
    if lines.is_empty() {
        return Err(QuoteTextError::EmptyQuote);
    }

    let (subject, intro) = match job_number(job) {
        Some(job) => (
            format!("Quote - job {}", job),
            format!("Please find our quote for job {} below.", job),
        ),
        None => ("Quote".to_string(), "Please find our quote below.".to_string()),
    };

    let body = format!(
        "Hi,\n\n{}\n\n{}\n\nThanks",
        intro,
        quote_text(lines, ItemLineStyle::SupplierPrice)
    );

    Ok(EmailDraft {
        subject,
        body,
    })
}

#[cfg(test)]
mod text_tests {
    use indoc::{formatdoc, indoc};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use crate::group::group_by_supplier;
    use crate::line::QuoteLine;
    use crate::text::{
        item_line, purchase_order_email, purchase_order_text, quote_email, quote_text, EmailDraft, ItemLineStyle,
        QuoteTextError,
    };

    fn build_lines() -> Vec<QuoteLine> {
        vec![
            QuoteLine::new(
                "Haymans 2025".to_string(),
                "Gate Valve 25mm".to_string(),
                "GV25".to_string(),
                dec!(10),
                2,
            ),
            QuoteLine::new(
                "Rexel".to_string(),
                "Smoke Detector".to_string(),
                "SD100".to_string(),
                dec!(5.5),
                1,
            ),
            QuoteLine::new(
                "HAYMANS".to_string(),
                "Cable Tie".to_string(),
                "CT1".to_string(),
                dec!(0.99),
                3,
            ),
        ]
    }

    #[rstest]
    #[case(ItemLineStyle::Plain, "2 x Gate Valve 25mm — GV25 — $10.00 each")]
    #[case(ItemLineStyle::SupplierPrice, "2 x Gate Valve 25mm — GV25 — $10.00 each (Haymans price)")]
    #[case(ItemLineStyle::SupplierPriceList, "2 x Gate Valve 25mm — GV25 — $10.00 each (Haymans price list)")]
    fn item_line_styles(#[case] style: ItemLineStyle, #[case] expected_line: &str) {
        // expect
        assert_eq!(item_line(&build_lines()[0], style), expected_line);
    }

    #[test]
    fn quote_text_with_total() {
        // given
        let expected_text = indoc! {"
            2 x Gate Valve 25mm — GV25 — $10.00 each
            1 x Smoke Detector — SD100 — $5.50 each
            3 x Cable Tie — CT1 — $0.99 each

            Total: $28.47"};

        // when
        let text = quote_text(&build_lines(), ItemLineStyle::Plain);

        // then
        assert_eq!(text, expected_text);
    }

    #[test]
    fn empty_quote_has_no_text() {
        assert_eq!(quote_text(&[], ItemLineStyle::Plain), "");
        assert_eq!(purchase_order_text(&[], Some("J1")), "");
    }

    #[rstest]
    #[case(Some("J1234"), "for job J1234")]
    #[case(None, "for this job")]
    #[case(Some("  "), "for this job")]
    fn purchase_order_text_is_grouped(#[case] job: Option<&str>, #[case] expected_suffix: &str) {
        // given
        let expected_text = formatdoc! {"
                Please forward a PO to Haymans {suffix}
                2 x Gate Valve 25mm — GV25 — $10.00 each (Haymans price list)
                3 x Cable Tie — CT1 — $0.99 each (Haymans price list)

                Please forward a PO to Rexel {suffix}
                1 x Smoke Detector — SD100 — $5.50 each (Rexel price list)",
            suffix = expected_suffix
        };

        // when
        let text = purchase_order_text(&build_lines(), job);

        // then
        assert_eq!(text, expected_text);
    }

    #[test]
    fn purchase_order_email_with_store() {
        // given
        let groups = group_by_supplier(&build_lines());

        // when
        let draft = purchase_order_email(&groups[0], Some("J1234"), Some(" Ringwood ")).unwrap();

        // then
        assert_eq!(draft, EmailDraft {
            subject: "PO request - Haymans Ringwood - job J1234".to_string(),
            body: indoc! {"
                Hi,

                Please forward a PO to Haymans Ringwood for job J1234
                2 x Gate Valve 25mm — GV25 — $10.00 each (Haymans price list)
                3 x Cable Tie — CT1 — $0.99 each (Haymans price list)

                Thanks"}
            .to_string(),
        });
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn purchase_order_email_without_store_is_aborted(#[case] store: Option<&str>) {
        // given
        let groups = group_by_supplier(&build_lines());

        // when
        let result = purchase_order_email(&groups[0], None, store);

        // then
        assert_eq!(
            result,
            Err(QuoteTextError::MissingStore {
                supplier: "Haymans".to_string()
            })
        );
    }

    #[test]
    fn purchase_order_email_ignores_store_when_not_required() {
        // given
        let groups = group_by_supplier(&build_lines());

        // when
        let draft = purchase_order_email(&groups[1], None, Some("Ringwood")).unwrap();

        // then
        assert_eq!(draft.subject, "PO request - Rexel");
        assert!(
            draft
                .body
                .contains("Please forward a PO to Rexel for this job")
        );
    }

    #[test]
    fn quote_email_with_job() {
        // when
        let draft = quote_email(&build_lines()[1..2], Some("J9")).unwrap();

        // then
        assert_eq!(draft, EmailDraft {
            subject: "Quote - job J9".to_string(),
            body: indoc! {"
                Hi,

                Please find our quote for job J9 below.

                1 x Smoke Detector — SD100 — $5.50 each (Rexel price)

                Total: $5.50

                Thanks"}
            .to_string(),
        });
    }

    #[test]
    fn quote_email_for_empty_quote() {
        assert_eq!(quote_email(&[], None), Err(QuoteTextError::EmptyQuote));
    }
}
