//! Query compilation and per-fragment matching.
//!
//! The query text is always escaped before compilation, so callers can never
//! inject a raw regular expression. The compiled [`Regex`] is immutable and
//! every fragment gets its own fresh match iterator, so no cursor state
//! carries over between fragments, pages or calls.

use super::SearchQuery;
use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// A query compiled once per search call and shared by every fragment.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
}

impl SearchPattern {
    /// Compile a query.
    ///
    /// Returns `Ok(None)` for an empty pattern: searching for nothing is a
    /// no-op, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::search::{SearchPattern, SearchQuery};
    ///
    /// assert!(SearchPattern::compile(&SearchQuery::new("")).unwrap().is_none());
    ///
    /// let pattern = SearchPattern::compile(&SearchQuery::new("a.b")).unwrap().unwrap();
    /// assert!(pattern.is_match("a.b"));
    /// assert!(!pattern.is_match("axb"));
    /// ```
    pub fn compile(query: &SearchQuery) -> Result<Option<Self>> {
        if query.pattern.is_empty() {
            return Ok(None);
        }

        let mut source = regex::escape(&query.pattern);
        if query.whole_word {
            source = format!(r"\b{}\b", source);
        }

        RegexBuilder::new(&source)
            .case_insensitive(!query.match_case)
            .build()
            .map(|regex| Some(Self { regex }))
            .map_err(|e| Error::InvalidPattern(e.to_string()))
    }

    /// The compiled regular expression source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True if the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// All non-overlapping, non-empty matches in `text`, left to right.
    pub fn matches<'p, 't>(&'p self, text: &'t str) -> PatternMatches<'p, 't> {
        PatternMatches {
            inner: self.regex.find_iter(text),
            text,
            byte_pos: 0,
            char_pos: 0,
        }
    }
}

/// A single match with character (not byte) offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    /// Char offset of the first matched character
    pub start: usize,
    /// Char offset one past the last matched character
    pub end: usize,
    /// Matched text, with the source casing
    pub text: &'t str,
}

/// Iterator over the matches in one fragment.
///
/// Created by [`SearchPattern::matches`].
#[derive(Debug)]
pub struct PatternMatches<'p, 't> {
    inner: regex::Matches<'p, 't>,
    text: &'t str,
    // Char offset of `byte_pos`, so each match only counts the gap since the
    // previous one.
    byte_pos: usize,
    char_pos: usize,
}

impl<'p, 't> Iterator for PatternMatches<'p, 't> {
    type Item = PatternMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let m = self.inner.next()?;
            // find_iter already steps past empty matches; they carry no
            // geometry so they are dropped here.
            if m.is_empty() {
                continue;
            }

            let start = self.char_pos + self.text[self.byte_pos..m.start()].chars().count();
            let end = start + m.as_str().chars().count();
            self.byte_pos = m.end();
            self.char_pos = end;

            return Some(PatternMatch {
                start,
                end,
                text: m.as_str(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(query: SearchQuery) -> SearchPattern {
        SearchPattern::compile(&query).unwrap().unwrap()
    }

    fn spans(pattern: &SearchPattern, text: &str) -> Vec<(usize, usize)> {
        pattern.matches(text).map(|m| (m.start, m.end)).collect()
    }

    #[test]
    fn test_empty_pattern_is_none() {
        assert!(SearchPattern::compile(&SearchQuery::new("")).unwrap().is_none());
    }

    #[test]
    fn test_default_is_case_insensitive() {
        let pattern = compile(SearchQuery::new("Engineer"));
        assert!(pattern.is_match("engineer"));
        assert!(pattern.is_match("ENGINEER"));
        assert!(pattern.is_match("EnGiNeEr"));
    }

    #[test]
    fn test_match_case() {
        let pattern = compile(SearchQuery::new("Engineer").with_match_case(true));
        assert!(pattern.is_match("Engineer"));
        assert!(!pattern.is_match("engineer"));
        assert!(!pattern.is_match("ENGINEER"));
    }

    #[test]
    fn test_whole_word() {
        let pattern = compile(SearchQuery::new("cat").with_whole_word(true));
        assert!(pattern.is_match("the cat sat"));
        assert!(pattern.is_match("cat"));
        assert!(!pattern.is_match("category"));
        assert!(!pattern.is_match("concatenate"));
        assert_eq!(pattern.as_str(), r"\bcat\b");
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let pattern = compile(SearchQuery::new("(a+)+$"));
        assert!(pattern.is_match("x (a+)+$ y"));
        assert!(!pattern.is_match("aaaa"));

        let pattern = compile(SearchQuery::new("C++"));
        assert_eq!(spans(&pattern, "C++ and C++"), vec![(0, 3), (8, 11)]);
    }

    #[test]
    fn test_non_overlapping_single_chars() {
        let pattern = compile(SearchQuery::new("a"));
        assert_eq!(spans(&pattern, "aaa"), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_non_overlapping_repeats() {
        let pattern = compile(SearchQuery::new("aa"));
        assert_eq!(spans(&pattern, "aaaaa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_char_offsets_not_bytes() {
        let pattern = compile(SearchQuery::new("café"));
        let found: Vec<_> = pattern.matches("Ünïcode café, CAFÉ").collect();
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start, found[0].end), (8, 12));
        assert_eq!(found[0].text, "café");
        assert_eq!((found[1].start, found[1].end), (14, 18));
        assert_eq!(found[1].text, "CAFÉ");
    }

    #[test]
    fn test_fresh_iterator_per_text() {
        let pattern = compile(SearchQuery::new("needle"));
        let long = "hay hay hay hay hay needle";
        assert_eq!(spans(&pattern, long), vec![(20, 26)]);
        // A shorter text scanned afterwards still starts at offset zero
        assert_eq!(spans(&pattern, "needle"), vec![(0, 6)]);
        assert_eq!(spans(&pattern, long), vec![(20, 26)]);
    }

    #[test]
    fn test_match_at_end_of_text() {
        let pattern = compile(SearchQuery::new("end"));
        assert_eq!(spans(&pattern, "the end"), vec![(4, 7)]);
    }
}
