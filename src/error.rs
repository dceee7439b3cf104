//! Error types for the locator.
//!
//! Per-fragment problems are recovered locally by the searcher and never show
//! up here unless strict text-layer validation is enabled. Per-page problems
//! are fatal to a search call and are reported with the page number attached.

use crate::fragment::FragmentDefect;

/// Result type alias for locator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a page source collaborator.
pub type BoxedSourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types that can occur while loading text layers or searching them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page source failed to produce fragments for a page
    #[error("Failed to retrieve text fragments for page {page}: {source}")]
    PageRetrieval {
        /// 1-based page number that failed to load
        page: usize,
        /// Underlying cause reported by the page source
        #[source]
        source: BoxedSourceError,
    },

    /// A fragment failed validation (strict text-layer mode only)
    #[error("Malformed text fragment {index} on page {page}: {defect}")]
    MalformedFragment {
        /// 1-based page number
        page: usize,
        /// 0-based fragment index within the page
        index: usize,
        /// What was wrong with it
        defect: FragmentDefect,
    },

    /// A page's text layer as a whole was rejected
    #[error("Invalid text layer on page {page}: {reason}")]
    InvalidTextLayer {
        /// 1-based page number
        page: usize,
        /// Why the page was rejected
        reason: String,
    },

    /// The compiled search pattern was rejected by the regex engine
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Requested page is outside the document
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested 1-based page number
        page: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// The caller cancelled the search
    #[error("Search cancelled before page {page}")]
    Cancelled {
        /// Next page that would have been searched
        page: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text layer JSON could not be decoded
    #[error("Invalid text layer JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a page source failure with the page it happened on.
    pub fn page_retrieval<E>(page: usize, source: E) -> Self
    where
        E: Into<BoxedSourceError>,
    {
        Error::PageRetrieval {
            page,
            source: source.into(),
        }
    }

    /// Page number this error refers to, if any.
    pub fn page(&self) -> Option<usize> {
        match self {
            Error::PageRetrieval { page, .. }
            | Error::MalformedFragment { page, .. }
            | Error::InvalidTextLayer { page, .. }
            | Error::PageOutOfRange { page, .. }
            | Error::Cancelled { page } => Some(*page),
            _ => None,
        }
    }
}
