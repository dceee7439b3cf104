//! Text search over a paged text layer.
//!
//! Pages are pulled from a [`PageSource`] one at a time and scanned fragment
//! by fragment. Each match is mapped into page space through the fragment's
//! transform, yielding both an axis-aligned rect and the exact quad.

use super::locate::locate_span;
use super::pattern::SearchPattern;
use crate::error::{Error, Result};
use crate::fragment::TextFragment;
use crate::geometry::{Quad, QuadPoints, Rect};
use crate::source::{AsyncPageSource, PageSource};
use serde::Serialize;
use std::ops::RangeInclusive;
use tokio_util::sync::CancellationToken;

/// A search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Literal text to find (never interpreted as a regex)
    pub pattern: String,
    /// Case sensitive search
    pub match_case: bool,
    /// Match whole words only
    pub whole_word: bool,
    /// Maximum number of results (0 = unlimited)
    pub max_results: usize,
    /// 1-based inclusive page range to search (None = all pages)
    pub page_range: Option<(usize, usize)>,
}

impl SearchQuery {
    /// Create a case-insensitive, substring query.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Set case sensitivity.
    pub fn with_match_case(mut self, value: bool) -> Self {
        self.match_case = value;
        self
    }

    /// Match whole words only.
    pub fn with_whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    /// Limit the number of results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Search only within a page range (1-based, inclusive).
    pub fn with_page_range(mut self, start: usize, end: usize) -> Self {
        self.page_range = Some((start, end));
        self
    }

    /// Pages to visit in a document of `page_count` pages.
    pub fn pages(&self, page_count: usize) -> RangeInclusive<usize> {
        let (start, end) = self.page_range.unwrap_or((1, page_count));
        start.max(1)..=end.min(page_count)
    }
}

/// A search result with position information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Page number (1-based) where the match was found
    pub page_number: usize,
    /// The matched text, with source casing
    pub text: String,
    /// Axis-aligned bounding box in page space (top = max Y)
    pub rect: Rect,
    /// Corners in bottom-left, bottom-right, top-left, top-right order
    pub quad_points: QuadPoints,
    /// Index of the fragment within its page
    pub fragment_index: usize,
    /// Char offset of the match start within the fragment
    pub start_index: usize,
    /// Char offset one past the match end within the fragment
    pub end_index: usize,
}

impl SearchResult {
    /// The match quad as structured corners.
    pub fn quad(&self) -> Quad {
        Quad::from_quad_points(&self.quad_points)
    }
}

/// Search results plus counters describing what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchReport {
    /// Matches in page, fragment and offset order
    pub results: Vec<SearchResult>,
    /// Pages whose fragments were scanned
    pub pages_searched: usize,
    /// Fragments skipped for missing or degenerate geometry
    pub fragments_skipped: usize,
    /// Matches whose geometry could not be computed
    pub matches_skipped: usize,
}

/// Text searcher for paged text layers.
pub struct TextSearcher;

impl TextSearcher {
    /// Search every page of `source` for `query`.
    ///
    /// An empty pattern yields no results without touching the source.
    /// A page that fails to load aborts the search with
    /// [`Error::PageRetrieval`]; malformed fragments are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::fragment::TextFragment;
    /// use pdf_locate::geometry::Matrix;
    /// use pdf_locate::search::{SearchQuery, TextSearcher};
    /// use pdf_locate::source::MemoryPages;
    ///
    /// let mut doc = MemoryPages::new(vec![vec![TextFragment::new(
    ///     "Senior Rockstar Engineer",
    ///     240.0,
    ///     12.0,
    ///     Matrix::translation(50.0, 700.0),
    /// )]]);
    /// let results = TextSearcher::search(&mut doc, &SearchQuery::new("rockstar")).unwrap();
    /// assert_eq!(results.len(), 1);
    /// assert_eq!(results[0].text, "Rockstar");
    /// assert_eq!(results[0].page_number, 1);
    /// ```
    pub fn search<S: PageSource>(source: &mut S, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        Self::search_with_report(source, query).map(|report| report.results)
    }

    /// Like [`TextSearcher::search`] but also returns skip counters.
    pub fn search_with_report<S: PageSource>(
        source: &mut S,
        query: &SearchQuery,
    ) -> Result<SearchReport> {
        Self::run(source, query, None)
    }

    /// Search that can be abandoned through `cancel`.
    ///
    /// The token is checked before each page is fetched. A cancelled search
    /// returns [`Error::Cancelled`] and discards partial results.
    pub fn search_with_cancel<S: PageSource>(
        source: &mut S,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<SearchReport> {
        Self::run(source, query, Some(cancel))
    }

    /// Search an asynchronous page source.
    ///
    /// Pages are awaited and scanned strictly in order, so at most one page
    /// of fragments is held at a time.
    pub async fn search_async<S: AsyncPageSource>(
        source: &mut S,
        query: &SearchQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<SearchReport> {
        let Some(mut run) = SearchRun::start(query)? else {
            return Ok(SearchReport::default());
        };

        for page in query.pages(source.page_count()) {
            check_cancelled(cancel, page)?;
            let fragments = source
                .page_fragments(page)
                .await
                .map_err(|e| Error::page_retrieval(page, e))?;
            if run.scan_page(page, &fragments) {
                break;
            }
        }

        Ok(run.finish())
    }

    /// Search one page's fragments with an already compiled pattern.
    pub fn search_page(
        page_number: usize,
        fragments: &[TextFragment],
        pattern: &SearchPattern,
    ) -> Vec<SearchResult> {
        let mut report = SearchReport::default();
        scan_fragments(page_number, fragments, pattern, 0, &mut report);
        report.results
    }

    fn run<S: PageSource>(
        source: &mut S,
        query: &SearchQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<SearchReport> {
        let Some(mut run) = SearchRun::start(query)? else {
            return Ok(SearchReport::default());
        };

        for page in query.pages(source.page_count()) {
            check_cancelled(cancel, page)?;
            let fragments = source
                .page_fragments(page)
                .map_err(|e| Error::page_retrieval(page, e))?;
            if run.scan_page(page, &fragments) {
                break;
            }
        }

        Ok(run.finish())
    }
}

fn check_cancelled(cancel: Option<&CancellationToken>, page: usize) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => {
            log::debug!("Search cancelled before page {}", page);
            Err(Error::Cancelled { page })
        },
        _ => Ok(()),
    }
}

/// State owned by a single search call.
struct SearchRun<'q> {
    query: &'q SearchQuery,
    pattern: SearchPattern,
    report: SearchReport,
}

impl<'q> SearchRun<'q> {
    fn start(query: &'q SearchQuery) -> Result<Option<Self>> {
        let Some(pattern) = SearchPattern::compile(query)? else {
            log::debug!("Empty search pattern, nothing to do");
            return Ok(None);
        };
        Ok(Some(Self {
            query,
            pattern,
            report: SearchReport::default(),
        }))
    }

    /// Returns true once the result limit is reached.
    fn scan_page(&mut self, page_number: usize, fragments: &[TextFragment]) -> bool {
        scan_fragments(
            page_number,
            fragments,
            &self.pattern,
            self.query.max_results,
            &mut self.report,
        )
    }

    fn finish(self) -> SearchReport {
        log::info!(
            "Found {} matches for {:?} across {} pages ({} fragments, {} matches skipped)",
            self.report.results.len(),
            self.query.pattern,
            self.report.pages_searched,
            self.report.fragments_skipped,
            self.report.matches_skipped
        );
        self.report
    }
}

/// Scan one page, appending to `report`. Returns true when `max_results`
/// (if non-zero) has been reached.
fn scan_fragments(
    page_number: usize,
    fragments: &[TextFragment],
    pattern: &SearchPattern,
    max_results: usize,
    report: &mut SearchReport,
) -> bool {
    log::debug!("Searching page {} ({} fragments)", page_number, fragments.len());
    report.pages_searched += 1;

    for (fragment_index, fragment) in fragments.iter().enumerate() {
        if let Err(defect) = fragment.check() {
            log::debug!(
                "Page {}: skipping fragment {}: {}",
                page_number,
                fragment_index,
                defect
            );
            report.fragments_skipped += 1;
            continue;
        }

        let char_len = fragment.text.chars().count();
        for m in pattern.matches(&fragment.text) {
            let Some(highlight) = locate_span(fragment, char_len, m.start, m.end) else {
                log::warn!(
                    "Page {}: no geometry for match {}..{} in fragment {}",
                    page_number,
                    m.start,
                    m.end,
                    fragment_index
                );
                report.matches_skipped += 1;
                continue;
            };

            report.results.push(SearchResult {
                page_number,
                text: m.text.to_string(),
                rect: highlight.rect,
                quad_points: highlight.quad.to_quad_points(),
                fragment_index,
                start_index: m.start,
                end_index: m.end,
            });

            if max_results > 0 && report.results.len() >= max_results {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Matrix;
    use crate::source::MemoryPages;

    fn line(text: &str, x: f32, y: f32) -> TextFragment {
        let width = text.chars().count() as f32 * 10.0;
        TextFragment::new(text, width, 12.0, Matrix::translation(x, y))
    }

    #[test]
    fn test_search_query_default() {
        let q = SearchQuery::default();
        assert!(q.pattern.is_empty());
        assert!(!q.match_case);
        assert!(!q.whole_word);
        assert_eq!(q.max_results, 0);
        assert!(q.page_range.is_none());
    }

    #[test]
    fn test_search_query_builder() {
        let q = SearchQuery::new("cat")
            .with_match_case(true)
            .with_whole_word(true)
            .with_max_results(10)
            .with_page_range(2, 5);

        assert_eq!(q.pattern, "cat");
        assert!(q.match_case);
        assert!(q.whole_word);
        assert_eq!(q.max_results, 10);
        assert_eq!(q.page_range, Some((2, 5)));
    }

    #[test]
    fn test_pages_clamped() {
        assert_eq!(SearchQuery::new("x").pages(3), 1..=3);
        assert_eq!(SearchQuery::new("x").with_page_range(0, 10).pages(3), 1..=3);
        assert_eq!(SearchQuery::new("x").with_page_range(2, 2).pages(3), 2..=2);
        assert!(SearchQuery::new("x").pages(0).is_empty());
        assert!(SearchQuery::new("x").with_page_range(3, 1).pages(5).is_empty());
    }

    #[test]
    fn test_search_page_order() {
        let pattern = SearchPattern::compile(&SearchQuery::new("a")).unwrap().unwrap();
        let frags = vec![line("banana", 0.0, 100.0), line("apple", 0.0, 80.0)];
        let results = TextSearcher::search_page(4, &frags, &pattern);

        let positions: Vec<_> = results
            .iter()
            .map(|r| (r.fragment_index, r.start_index))
            .collect();
        assert_eq!(positions, vec![(0, 1), (0, 3), (0, 5), (1, 0)]);
        assert!(results.iter().all(|r| r.page_number == 4));
    }

    #[test]
    fn test_degenerate_fragments_are_counted() {
        let mut doc = MemoryPages::new(vec![vec![
            TextFragment::new("", 10.0, 12.0, Matrix::identity()),
            TextFragment::new("engineer", 0.0, 12.0, Matrix::identity()),
            line("engineer", 0.0, 0.0),
        ]]);
        let report = TextSearcher::search_with_report(&mut doc, &SearchQuery::new("engineer")).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].fragment_index, 2);
        assert_eq!(report.fragments_skipped, 2);
        assert_eq!(report.matches_skipped, 0);
        assert_eq!(report.pages_searched, 1);
    }

    #[test]
    fn test_max_results_stops_early() {
        let mut fetched = Vec::new();
        let mut source = crate::source::FnPageSource::new(3, |page| {
            fetched.push(page);
            Ok::<_, Error>(vec![line("test test", 0.0, 0.0)])
        });
        let query = SearchQuery::new("test").with_max_results(3);
        let results = TextSearcher::search(&mut source, &query).unwrap();
        drop(source);

        assert_eq!(results.len(), 3);
        assert_eq!(fetched, vec![1, 2]);
    }

    #[test]
    fn test_empty_pattern_does_not_fetch() {
        type PageResult = std::result::Result<Vec<TextFragment>, Error>;
        let mut source = crate::source::FnPageSource::new(2, |_page| -> PageResult {
            panic!("page fetched for empty pattern")
        });
        let report = TextSearcher::search_with_report(&mut source, &SearchQuery::new("")).unwrap();
        assert_eq!(report, SearchReport::default());
    }

    #[test]
    fn test_result_quad_accessor() {
        let mut doc = MemoryPages::new(vec![vec![line("abc", 5.0, 5.0)]]);
        let results = TextSearcher::search(&mut doc, &SearchQuery::new("b")).unwrap();
        let quad = results[0].quad();
        assert_eq!(quad.to_quad_points(), results[0].quad_points);
        assert_eq!(quad.bounding_rect(), results[0].rect);
    }
}
