//! Fuzzy ranking of picker rows.

use super::PickItem;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// A matched row with score and label match indices for highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedItem {
    pub index: usize,
    pub score: i64,
    pub indices: Vec<usize>,
}

/// Rank `items` against `query`, matching label and description.
///
/// An empty query keeps every item in its original order. Otherwise items are
/// sorted by score descending; ties keep their original order.
pub fn rank_items(matcher: &SkimMatcherV2, items: &[PickItem], query: &str) -> Vec<MatchedItem> {
    let query = query.trim();
    if query.is_empty() {
        return (0..items.len())
            .map(|index| MatchedItem {
                index,
                score: 0,
                indices: Vec::new(),
            })
            .collect();
    }

    let mut matches: Vec<MatchedItem> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let label = matcher.fuzzy_indices(&item.label, query);
            let description = item
                .description
                .as_deref()
                .and_then(|d| matcher.fuzzy_match(d, query));
            match (label, description) {
                (Some((score, indices)), desc) => Some(MatchedItem {
                    index,
                    score: score.max(desc.unwrap_or(i64::MIN)),
                    indices,
                }),
                (None, Some(score)) => Some(MatchedItem {
                    index,
                    score,
                    indices: Vec::new(),
                }),
                (None, None) => None,
            }
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
