use catalog::part::Part;
use tracing::debug;

use crate::fuzzy::FuzzyIndex;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SearchQuery {
    /// Free text, matched against all searchable fields.
    pub text: String,
    /// Case-insensitive 'contains' filter on the supplier.
    pub supplier: String,
    /// Case-insensitive 'contains' filter on the type.
    pub kind: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum MatchMode {
    /// No query text, the unfiltered list.
    All,
    /// Every query token was found in the part.
    Exact,
    /// No exact matches, approximate matches were used instead.
    Fuzzy,
}

#[derive(Debug)]
pub struct SearchResult<'parts> {
    pub parts: Vec<&'parts Part>,
    /// Lowercase query tokens, for highlighting.
    pub tokens: Vec<String>,
    pub mode: MatchMode,
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// The text searched for query tokens, lowercase.
pub fn haystack(part: &Part) -> String {
    [
        part.part_number.as_str(),
        part.description.as_str(),
        part.supplier.as_str(),
        part.kind.as_str(),
        part.notes.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// True if the haystack contains every token, in any order.
pub fn matches_all_tokens(haystack: &str, tokens: &[String]) -> bool {
    tokens
        .iter()
        .all(|token| haystack.contains(token.as_str()))
}

pub fn search<'parts>(parts: &'parts [Part], query: &SearchQuery) -> SearchResult<'parts> {
    let tokens = tokenize(&query.text);

    let (matched, mode) = if tokens.is_empty() {
        (parts.iter().collect::<Vec<_>>(), MatchMode::All)
    } else {
        let exact: Vec<&Part> = parts
            .iter()
            .filter(|part| matches_all_tokens(&haystack(part), &tokens))
            .collect();

        if !exact.is_empty() {
            (exact, MatchMode::Exact)
        } else {
            let fuzzy = FuzzyIndex::new(parts)
                .search(&query.text)
                .into_iter()
                .map(|found| found.part)
                .collect();
            (fuzzy, MatchMode::Fuzzy)
        }
    };

    let supplier_filter = query.supplier.trim().to_lowercase();
    let kind_filter = query.kind.trim().to_lowercase();

    let filtered: Vec<&Part> = matched
        .into_iter()
        .filter(|part| {
            supplier_filter.is_empty()
                || part
                    .supplier
                    .to_lowercase()
                    .contains(&supplier_filter)
        })
        .filter(|part| {
            kind_filter.is_empty()
                || part
                    .kind
                    .to_lowercase()
                    .contains(&kind_filter)
        })
        .collect();

    debug!(
        "search. query: {:?}, mode: {:?}, matches: {}/{}",
        query,
        mode,
        filtered.len(),
        parts.len()
    );

    SearchResult {
        parts: filtered,
        tokens,
        mode,
    }
}
