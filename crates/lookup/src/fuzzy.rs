use catalog::part::Part;
use tracing::trace;

/// Maximum edit distance, relative to the query length, for a field to count as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

/// Approximate matching over the searchable fields of a parts list.
///
/// A field matches when some substring of it is within `threshold * query length` edits
/// of the whole query, where an edit is an insertion, deletion, substitution or a
/// transposition of two adjacent characters.  Where the substring occurs in the field is
/// not significant.
pub struct FuzzyIndex<'parts> {
    entries: Vec<FuzzyEntry<'parts>>,
    threshold: f64,
}

struct FuzzyEntry<'parts> {
    part: &'parts Part,
    fields: Vec<Vec<char>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'parts> {
    pub part: &'parts Part,
    /// 0.0 = exact substring, up to and including the threshold.
    pub score: f64,
}

impl<'parts> FuzzyIndex<'parts> {
    pub fn new(parts: &'parts [Part]) -> Self {
        Self::with_threshold(parts, DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(parts: &'parts [Part], threshold: f64) -> Self {
        let entries = parts
            .iter()
            .map(|part| FuzzyEntry {
                part,
                fields: [
                    &part.description,
                    &part.part_number,
                    &part.supplier,
                    &part.kind,
                    &part.notes,
                ]
                .into_iter()
                .filter(|field| !field.is_empty())
                .map(|field| field.to_lowercase().chars().collect())
                .collect(),
            })
            .collect();

        Self {
            entries,
            threshold,
        }
    }

    /// Matches ordered by score, best first, ties keep the parts list order.
    pub fn search(&self, query: &str) -> Vec<FuzzyMatch<'parts>> {
        let pattern: Vec<char> = query.trim().to_lowercase().chars().collect();
        if pattern.is_empty() {
            return vec![];
        }

        let max_distance = (self.threshold * pattern.len() as f64).floor() as usize;

        let mut matches: Vec<FuzzyMatch> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let best_distance = entry
                    .fields
                    .iter()
                    .map(|field| substring_distance(&pattern, field))
                    .min()?;

                if best_distance > max_distance {
                    return None;
                }

                Some(FuzzyMatch {
                    part: entry.part,
                    score: best_distance as f64 / pattern.len() as f64,
                })
            })
            .collect();

        // stable, so equal scores keep their original order
        matches.sort_by(|a, b| a.score.total_cmp(&b.score));

        trace!("fuzzy search. query: '{}', matches: {}", query, matches.len());

        matches
    }
}

/// The smallest edit distance between `pattern` and any substring of `text`.
///
/// Sellers' variant of the optimal string alignment distance, row `i` holds the cost of
/// matching the first `i` pattern characters ending at each text position, a match may
/// start anywhere in the text for free.
fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let width = text.len() + 1;

    let mut before_previous: Vec<usize> = vec![0; width];
    let mut previous: Vec<usize> = vec![0; width];
    let mut current: Vec<usize> = vec![0; width];

    for i in 1..=pattern.len() {
        current[0] = i;
        for j in 1..width {
            let substitution_cost = usize::from(pattern[i - 1] != text[j - 1]);

            let mut cost = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + substitution_cost);

            if i > 1 && j > 1 && pattern[i - 1] == text[j - 2] && pattern[i - 2] == text[j - 1] {
                cost = cost.min(before_previous[j - 2] + 1);
            }

            current[j] = cost;
        }

        std::mem::swap(&mut before_previous, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    // after the final swap the last computed row is `previous`
    previous
        .iter()
        .copied()
        .min()
        .unwrap_or(pattern.len())
}
