//! Splitting of selection queries into OR-clauses and AND-conditions.
//!
//! The OR split is a single left-to-right scan that tracks quote state, so a
//! quoted value such as `tag:"a or b"` stays in one clause. The AND split is a
//! plain case-insensitive `\s+and\s+` split and does not look at quotes.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{Clause, Span};

static AND_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("and-separator regex is valid"));

/// Iterator over the OR-clauses of a query.
pub struct Lexer<'a> {
    input: &'a str,
    /// Current position in the input (byte index)
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0, finished: false }
    }

    /// Returns the character at the current position without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Advances one character and returns it.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Whether the input at the current position reads `<ws>or<ws>`, or `<ws>or`
    /// at the end of input.
    fn at_or_separator(&self) -> bool {
        let rest = &self.input[self.position..];
        if !rest.starts_with(char::is_whitespace) {
            return false;
        }
        let word = rest.trim_start();
        match word.get(..2) {
            Some(or) if or.eq_ignore_ascii_case("or") => {
                let after = &word[2..];
                after.is_empty() || after.starts_with(char::is_whitespace)
            }
            _ => false,
        }
    }

    /// Consumes `<ws>or<ws>`. Caller has checked `at_or_separator`.
    fn consume_or_separator(&mut self) {
        self.skip_whitespace();
        self.bump();
        self.bump();
        self.skip_whitespace();
    }

    fn clause(&self, start: usize, end: usize) -> Clause<'a> {
        let raw = &self.input[start..end];
        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        Clause::new(text, Span::new(start + leading, start + leading + text.len()))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Clause<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let start = self.position;
        let mut quote: Option<char> = None;

        loop {
            let Some(c) = self.peek() else {
                self.finished = true;
                let clause = self.clause(start, self.position);
                // A trailing empty clause carries no condition.
                return if clause.text.is_empty() { None } else { Some(clause) };
            };

            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '"' || c == '\'' => quote = Some(c),
                None if c.is_whitespace() && self.at_or_separator() => {
                    let end = self.position;
                    self.consume_or_separator();
                    return Some(self.clause(start, end));
                }
                None => {}
            }
            self.bump();
        }
    }
}

/// Splits one OR-clause into its AND-conditions.
pub fn split_conditions(clause: &str) -> Vec<&str> {
    AND_SEPARATOR.split(clause).map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses(input: &str) -> Vec<&str> {
        Lexer::new(input).map(|c| c.text).collect()
    }

    #[test]
    fn test_single_clause() {
        assert_eq!(clauses(r#"kind:"dbt""#), vec![r#"kind:"dbt""#]);
    }

    #[test]
    fn test_or_is_case_insensitive() {
        assert_eq!(
            clauses(r#"kind:"dbt" OR kind:"spark" Or group:core"#),
            vec![r#"kind:"dbt""#, r#"kind:"spark""#, "group:core"]
        );
    }

    #[test]
    fn test_or_inside_quotes_is_kept() {
        assert_eq!(clauses(r#"tag:"a or b""#), vec![r#"tag:"a or b""#]);
        assert_eq!(
            clauses("tag:'x or y' or kind:dbt"),
            vec!["tag:'x or y'", "kind:dbt"]
        );
    }

    #[test]
    fn test_mixed_quotes_do_not_close_each_other() {
        assert_eq!(
            clauses(r#"tag:"it's or not" or kind:dbt"#),
            vec![r#"tag:"it's or not""#, "kind:dbt"]
        );
    }

    #[test]
    fn test_or_needs_surrounding_whitespace() {
        assert_eq!(clauses("kind:dbt orange"), vec!["kind:dbt orange"]);
        assert_eq!(clauses("group:core_or_not"), vec!["group:core_or_not"]);
    }

    #[test]
    fn test_extra_whitespace_is_consumed() {
        assert_eq!(clauses("kind:a   or \t kind:b"), vec!["kind:a", "kind:b"]);
    }

    #[test]
    fn test_spans_point_into_source() {
        let input = "kind:a or  group:b";
        let spans: Vec<_> = Lexer::new(input).map(|c| c.span).collect();
        assert_eq!(spans, vec![Span::new(0, 6), Span::new(11, 18)]);
        assert_eq!(&input[11..18], "group:b");
    }

    #[test]
    fn test_empty_input_has_no_clauses() {
        assert!(clauses("").is_empty());
        assert!(clauses("   ").is_empty());
    }

    #[test]
    fn test_doubled_or_leaves_bare_word() {
        // The separator swallows the whitespace the second `or` would need.
        assert_eq!(clauses("kind:a or  or kind:b"), vec!["kind:a", "or kind:b"]);
    }

    #[test]
    fn test_trailing_or_ends_the_clause() {
        assert_eq!(clauses("kind:a or"), vec!["kind:a"]);
        assert_eq!(clauses("kind:a OR  "), vec!["kind:a"]);
        assert_eq!(clauses(r#"tag:"x or""#), vec![r#"tag:"x or""#]);
    }

    #[test]
    fn test_and_split() {
        assert_eq!(
            split_conditions(r#"kind:"dbt" AND group:"core" and tag:x"#),
            vec![r#"kind:"dbt""#, r#"group:"core""#, "tag:x"]
        );
    }

    #[test]
    fn test_and_split_ignores_quotes() {
        assert_eq!(split_conditions(r#"tag:"x and y""#), vec![r#"tag:"x"#, r#"y""#]);
    }
}
