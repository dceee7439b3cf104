//! Substring search over a PDF text layer.
//!
//! This module finds every occurrence of a literal query in a paged text
//! layer and converts each one into page-space highlight geometry:
//! - an axis-aligned `rect` (`[left, top, right, bottom]`, Y up)
//! - `quad_points` that keep rotation and skew of the underlying text
//!
//! Supports case-insensitive (default) and case-sensitive matching,
//! whole-word matching, result limits, page ranges and cancellation.
//!
//! ## Example
//!
//! ```ignore
//! use pdf_locate::config::TextLayerOptions;
//! use pdf_locate::search::{SearchQuery, TextSearcher};
//! use pdf_locate::source::JsonTextLayer;
//!
//! let mut layer = JsonTextLayer::open("resume.text.json", TextLayerOptions::default())?;
//!
//! let results = TextSearcher::search(&mut layer, &SearchQuery::new("rockstar").with_whole_word(true))?;
//! for result in results {
//!     println!("Found '{}' on page {} at {:?}", result.text, result.page_number, result.rect);
//! }
//! ```

mod locate;
mod pattern;
mod text_search;

pub use locate::{locate_span, Highlight};
pub use pattern::{PatternMatch, PatternMatches, SearchPattern};
pub use text_search::{SearchQuery, SearchReport, SearchResult, TextSearcher};
