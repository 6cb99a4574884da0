//! Wildcard patterns for `key:` conditions.
//!
//! `*` matches any run of characters and `?` exactly one; everything else,
//! including `.`, is literal. Matching is case-insensitive and the pattern
//! may occur anywhere in the dotted key path.

use regex::Regex;
use tracing::debug;

/// A compiled `key:` wildcard pattern.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    /// `None` when compilation failed; such a pattern matches nothing.
    regex: Option<Regex>,
}

impl KeyPattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = match Regex::new(&wildcard_to_regex(&source)) {
            Ok(regex) => Some(regex),
            Err(e) => {
                debug!(pattern = %source, error = %e, "key pattern failed to compile");
                None
            }
        };
        Self { source, regex }
    }

    /// The pattern as written in the query, quotes removed.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(key))
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?is)");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            c => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out
}
