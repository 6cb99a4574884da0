//! Evaluation of selection queries against asset metadata.
//!
//! Evaluation never fails. Conditions the parser did not recognise match, and
//! a `key:` pattern that did not compile matches nothing.

use tracing::debug;

use crate::ast::{AndGroup, Condition, SelectionQuery};
use crate::metadata::AssetMetadata;
use crate::parser::parse_query;

/// Something that decides whether an asset belongs to a selection.
pub trait AssetPredicate {
    fn matches(&self, metadata: &AssetMetadata) -> bool;
}

impl AssetPredicate for Condition {
    fn matches(&self, metadata: &AssetMetadata) -> bool {
        match self {
            Condition::Membership { field, value } => metadata.values(*field).contains(value),
            Condition::Key(pattern) => pattern.is_match(&metadata.key),
            // Dependency selection is not followed: only the named asset matches.
            Condition::UpstreamKey(key) | Condition::DownstreamKey(key) => metadata.key == *key,
            Condition::Unrecognized(text) => {
                debug!(condition = %text, "unrecognized condition treated as a match");
                true
            }
        }
    }
}

impl AssetPredicate for AndGroup {
    fn matches(&self, metadata: &AssetMetadata) -> bool {
        self.conditions.iter().all(|c| c.matches(metadata))
    }
}

impl AssetPredicate for SelectionQuery {
    fn matches(&self, metadata: &AssetMetadata) -> bool {
        self.is_empty() || self.clauses.iter().any(|c| c.matches(metadata))
    }
}

/// Parses `query` and tests it against `metadata`. An empty query matches.
pub fn evaluate(query: &str, metadata: &AssetMetadata) -> bool {
    let matched = parse_query(query).matches(metadata);
    debug!(query, key = %metadata.key, matched, "evaluated selection query");
    matched
}
