//! # PDF Locate
//!
//! Find text in a parsed PDF text layer and turn every occurrence into
//! highlight geometry.
//!
//! ## Core Features
//!
//! - **Literal search**: queries are always escaped; case-insensitive by
//!   default, optional case-sensitive and whole-word matching
//! - **Transform-aware geometry**: each match is mapped through its
//!   fragment's affine matrix, giving an axis-aligned rect and the exact
//!   quad points for rotated or skewed text
//! - **Lazy pages**: text fragments are pulled one page at a time from a
//!   [`source::PageSource`] or [`source::AsyncPageSource`]
//! - **Graceful degradation**: malformed fragments are skipped, failed pages
//!   abort the search with the page number attached
//! - **Viewport conversion**: Y-flipped, scaled boxes for overlay rendering
//!
//! Character positions inside a fragment are estimated proportionally
//! (uniform glyph width); see [`search::locate_span`].
//!
//! ## Quick Start
//!
//! ```
//! use pdf_locate::fragment::TextFragment;
//! use pdf_locate::geometry::Matrix;
//! use pdf_locate::search::{SearchQuery, TextSearcher};
//! use pdf_locate::source::MemoryPages;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = MemoryPages::new(vec![
//!     vec![TextFragment::new("Page one", 80.0, 12.0, Matrix::translation(72.0, 720.0))],
//!     vec![TextFragment::new("Senior Rockstar Engineer", 240.0, 12.0, Matrix::translation(50.0, 700.0))],
//! ]);
//!
//! let results = TextSearcher::search(&mut doc, &SearchQuery::new("rockstar"))?;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].page_number, 2);
//! assert_eq!(<[f32; 4]>::from(results[0].rect), [120.0, 712.0, 200.0, 700.0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at
//! your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and fragment model
pub mod fragment;
pub mod geometry;

// Text layer access
pub mod config;
pub mod source;

// Text search
pub mod search;

// Overlay coordinates
pub mod viewport;

// Re-exports
pub use config::TextLayerOptions;
pub use error::{Error, Result};
pub use fragment::{FragmentDefect, RawField, RawTextFragment, TextFragment};
pub use geometry::{Matrix, Point, Quad, QuadPoints, Rect};
pub use search::{SearchQuery, SearchReport, SearchResult, TextSearcher};
pub use source::{AsyncPageSource, FnPageSource, JsonTextLayer, MemoryPages, PageSource};
pub use viewport::{Viewport, ViewportBox};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
