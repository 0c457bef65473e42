//! Instant local filtering over already-fetched tools.
//!
//! Matching is typo-tolerant substring matching: a field matches at
//! distance 0.0 when it contains the query outright (position in the field
//! is irrelevant), and otherwise at the best normalized edit distance
//! between the query and a query-sized window of the field. A record is
//! kept when its best field comes in under the tolerance threshold.
//!
//! The index is rebuilt only when the accumulated list itself changes, so
//! per-keystroke filtering touches no allocations beyond the result list.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use unicase::UniCase;

use crate::types::Tool;

/// Default match tolerance; see [`crate::config::SearchConfig`].
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Searchable projection of one tool.
#[derive(Debug, Clone)]
struct IndexEntry {
    /// Display name, kept verbatim for highlight computation
    name: String,
    /// Case-folded searchable fields: name, description, category label,
    /// then each tag individually
    fields: Vec<String>,
}

/// Case-folded field index over the accumulated list.
///
/// Identity-stamped with the accumulator epoch and list length so the
/// coordinator can tell when a rebuild is due.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    epoch: u64,
    len: usize,
}

impl SearchIndex {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            epoch: 0,
            len: 0,
        }
    }

    pub fn build(tools: &[Tool], epoch: u64) -> Self {
        let entries = tools
            .iter()
            .map(|tool| {
                let mut fields = Vec::with_capacity(3 + tool.tags.len());
                fields.push(fold(&tool.name));
                fields.push(fold(&tool.description));
                fields.push(fold(&tool.category_label));
                for tag in &tool.tags {
                    fields.push(fold(tag));
                }
                IndexEntry {
                    name: tool.name.clone(),
                    fields,
                }
            })
            .collect();

        Self {
            entries,
            epoch,
            len: tools.len(),
        }
    }

    /// Whether this index was built from the given list identity.
    pub fn is_current(&self, epoch: u64, len: usize) -> bool {
        self.epoch == epoch && self.len == len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One filtered result: the position of the tool in the accumulated list,
/// its aggregate distance, and the matched character indices in the name
/// for highlighting.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTool {
    pub position: usize,
    pub distance: f64,
    pub name_indices: Vec<usize>,
}

/// Filter the indexed list by a live query.
///
/// An empty (or all-whitespace) query returns every position in original
/// order; ranking does not apply. Otherwise results are sorted by
/// ascending distance; ties keep accumulated order.
pub fn filter(index: &SearchIndex, query: &str, threshold: f64) -> Vec<RankedTool> {
    let query = query.trim();
    if query.is_empty() {
        return (0..index.entries.len())
            .map(|position| RankedTool {
                position,
                distance: 0.0,
                name_indices: vec![],
            })
            .collect();
    }

    let folded_query = fold(query);
    let matcher = SkimMatcherV2::default().smart_case();

    let mut results: Vec<RankedTool> = index
        .entries
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let distance = entry
                .fields
                .iter()
                .map(|field| field_distance(field, &folded_query))
                .fold(f64::INFINITY, f64::min);

            if distance > threshold {
                return None;
            }

            let name_indices = matcher
                .fuzzy_indices(&entry.name, query)
                .map(|(_, indices)| indices)
                .unwrap_or_default();

            Some(RankedTool {
                position,
                distance,
                name_indices,
            })
        })
        .collect();

    // Stable sort: equal distances keep first-seen order.
    results.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

fn fold(s: &str) -> String {
    UniCase::new(s).to_folded_case()
}

/// Distance between a query and one field, in [0, 1].
///
/// 0.0 for a containment hit anywhere in the field; otherwise the minimum
/// Levenshtein distance between the query and any query-sized character
/// window of the field, normalized by query length.
fn field_distance(field: &str, query: &str) -> f64 {
    if field.is_empty() {
        return 1.0;
    }
    if field.contains(query) {
        return 0.0;
    }

    let query_len = query.chars().count();
    let field_chars: Vec<char> = field.chars().collect();

    if field_chars.len() <= query_len {
        let distance = strsim::levenshtein(field, query) as f64 / query_len as f64;
        return distance.min(1.0);
    }

    let mut best = f64::INFINITY;
    let mut window = String::with_capacity(query_len * 4);
    for start in 0..=(field_chars.len() - query_len) {
        window.clear();
        window.extend(&field_chars[start..start + query_len]);
        let distance = strsim::levenshtein(&window, query) as f64 / query_len as f64;
        if distance < best {
            best = distance;
        }
        if best == 0.0 {
            break;
        }
    }
    best.min(1.0)
}
