//! Page sources: where the searcher pulls text fragments from.
//!
//! Fragments are requested one page at a time so a large document never has
//! to be fully decoded up front. Page numbers are 1-based throughout.

use crate::config::TextLayerOptions;
use crate::error::{Error, Result};
use crate::fragment::{RawTextFragment, TextFragment};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io::Read;
use std::path::Path;

/// Synchronous, lazily-evaluated access to a document's text layer.
pub trait PageSource {
    /// Error reported when a page cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fragments of page `page_number` (1-based), in layout order.
    fn page_fragments(
        &mut self,
        page_number: usize,
    ) -> std::result::Result<Vec<TextFragment>, Self::Error>;
}

/// Asynchronous counterpart of [`PageSource`], for text layers that decode
/// pages on demand.
///
/// Page futures must be `Send` so a search can run on a multi-threaded
/// runtime via `tokio::spawn`.
pub trait AsyncPageSource {
    /// Error reported when a page cannot be produced.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Fragments of page `page_number` (1-based), in layout order.
    fn page_fragments(
        &mut self,
        page_number: usize,
    ) -> impl Future<Output = std::result::Result<Vec<TextFragment>, Self::Error>> + Send;
}

/// A fully materialized document, one fragment list per page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPages {
    pages: Vec<Vec<TextFragment>>,
}

impl MemoryPages {
    /// Wrap per-page fragment lists (index 0 is page 1).
    pub fn new(pages: Vec<Vec<TextFragment>>) -> Self {
        Self { pages }
    }

    fn page(&self, page_number: usize) -> Result<Vec<TextFragment>> {
        page_number
            .checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .cloned()
            .ok_or(Error::PageOutOfRange {
                page: page_number,
                count: self.pages.len(),
            })
    }
}

impl From<Vec<Vec<TextFragment>>> for MemoryPages {
    fn from(pages: Vec<Vec<TextFragment>>) -> Self {
        Self::new(pages)
    }
}

impl PageSource for MemoryPages {
    type Error = Error;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&mut self, page_number: usize) -> Result<Vec<TextFragment>> {
        self.page(page_number)
    }
}

impl AsyncPageSource for MemoryPages {
    type Error = Error;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn page_fragments(&mut self, page_number: usize) -> Result<Vec<TextFragment>> {
        self.page(page_number)
    }
}

/// Page source backed by a closure, for callers that decode pages lazily.
///
/// # Examples
///
/// ```
/// use pdf_locate::fragment::TextFragment;
/// use pdf_locate::geometry::Matrix;
/// use pdf_locate::source::{FnPageSource, PageSource};
///
/// let mut source = FnPageSource::new(2, |page| {
///     Ok::<_, std::io::Error>(vec![TextFragment::new(
///         format!("page {}", page),
///         60.0,
///         12.0,
///         Matrix::identity(),
///     )])
/// });
/// assert_eq!(source.page_count(), 2);
/// assert_eq!(source.page_fragments(2).unwrap()[0].text, "page 2");
/// ```
pub struct FnPageSource<F> {
    page_count: usize,
    fetch: F,
}

impl<F> FnPageSource<F> {
    /// Create a source with `page_count` pages served by `fetch`.
    pub fn new(page_count: usize, fetch: F) -> Self {
        Self { page_count, fetch }
    }
}

impl<F, E> PageSource for FnPageSource<F>
where
    F: FnMut(usize) -> std::result::Result<Vec<TextFragment>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_fragments(&mut self, page_number: usize) -> std::result::Result<Vec<TextFragment>, E> {
        (self.fetch)(page_number)
    }
}

/// One page of pdf.js-style text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageTextContent {
    /// Raw fragments in layout order
    #[serde(default, alias = "fragments")]
    pub items: Vec<RawTextFragment>,
    /// Page width in user space units, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Page height in user space units, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Serialized text layer: `{"pages": [{"items": [...]}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLayerDocument {
    /// Pages in order
    pub pages: Vec<PageTextContent>,
}

/// Text layer loaded from JSON.
///
/// Fragments are kept in raw form and validated only when their page is
/// requested.
#[derive(Debug, Clone)]
pub struct JsonTextLayer {
    document: TextLayerDocument,
    options: TextLayerOptions,
}

impl JsonTextLayer {
    /// Wrap an already-decoded document.
    pub fn new(document: TextLayerDocument, options: TextLayerOptions) -> Self {
        Self { document, options }
    }

    /// Parse a text layer from a JSON string.
    pub fn parse(json: &str, options: TextLayerOptions) -> Result<Self> {
        let document: TextLayerDocument = serde_json::from_str(json)?;
        Ok(Self::new(document, options))
    }

    /// Read a text layer from any reader.
    pub fn from_reader<R: Read>(reader: R, options: TextLayerOptions) -> Result<Self> {
        let document: TextLayerDocument = serde_json::from_reader(reader)?;
        Ok(Self::new(document, options))
    }

    /// Open a text layer JSON file.
    pub fn open<P: AsRef<Path>>(path: P, options: TextLayerOptions) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        log::debug!("Loading text layer from {}", path.as_ref().display());
        Self::from_reader(std::io::BufReader::new(file), options)
    }

    /// Validation options in effect.
    pub fn options(&self) -> TextLayerOptions {
        self.options
    }

    /// Raw content of a page (1-based).
    pub fn page(&self, page_number: usize) -> Option<&PageTextContent> {
        page_number
            .checked_sub(1)
            .and_then(|idx| self.document.pages.get(idx))
    }

    /// Page height, when the text layer records it.
    pub fn page_height(&self, page_number: usize) -> Option<f32> {
        self.page(page_number).and_then(|p| p.height)
    }
}

impl PageSource for JsonTextLayer {
    type Error = Error;

    fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    fn page_fragments(&mut self, page_number: usize) -> Result<Vec<TextFragment>> {
        let page = self.page(page_number).ok_or(Error::PageOutOfRange {
            page: page_number,
            count: self.document.pages.len(),
        })?;
        validate_page(page_number, &page.items, &self.options)
    }
}

/// Validate one page of raw fragments.
///
/// In lenient mode malformed fragments are dropped with a warning; in strict
/// mode the first one fails the page.
pub fn validate_page(
    page_number: usize,
    raw: &[RawTextFragment],
    options: &TextLayerOptions,
) -> Result<Vec<TextFragment>> {
    let mut accepted = raw.len();
    if options.max_fragments_per_page > 0 && raw.len() > options.max_fragments_per_page {
        if options.strict {
            return Err(Error::InvalidTextLayer {
                page: page_number,
                reason: format!(
                    "{} fragments exceed the limit of {}",
                    raw.len(),
                    options.max_fragments_per_page
                ),
            });
        }
        log::warn!(
            "Page {}: dropping {} fragments beyond the limit of {}",
            page_number,
            raw.len() - options.max_fragments_per_page,
            options.max_fragments_per_page
        );
        accepted = options.max_fragments_per_page;
    }

    let mut fragments = Vec::with_capacity(accepted);
    for (index, item) in raw.iter().take(accepted).enumerate() {
        match item.clone().validate() {
            Ok(fragment) => fragments.push(fragment),
            Err(defect) if options.strict => {
                return Err(Error::MalformedFragment {
                    page: page_number,
                    index,
                    defect,
                });
            },
            Err(defect) => {
                log::warn!("Page {}: skipping fragment {}: {}", page_number, index, defect);
            },
        }
    }
    Ok(fragments)
}
