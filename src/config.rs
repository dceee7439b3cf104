//! Text layer validation options.

/// Options controlling how raw text-layer fragments are validated.
///
/// # Example
///
/// ```
/// use pdf_locate::config::TextLayerOptions;
///
/// // Lenient mode - skip malformed fragments and keep going (default)
/// let lenient = TextLayerOptions::lenient();
///
/// // Strict mode - fail the page on the first malformed fragment
/// let strict = TextLayerOptions::strict();
///
/// let custom = TextLayerOptions {
///     strict: false,
///     max_fragments_per_page: 10_000,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayerOptions {
    /// Fail on the first malformed fragment (true) or skip it (false)
    pub strict: bool,

    /// Maximum number of fragments accepted per page (0 = unlimited)
    ///
    /// Guards against pathological text layers. In lenient mode the excess
    /// is dropped with a warning; in strict mode the page fails.
    pub max_fragments_per_page: usize,
}

impl Default for TextLayerOptions {
    fn default() -> Self {
        Self::lenient()
    }
}

impl TextLayerOptions {
    /// Strict mode: any malformed fragment fails its page.
    pub fn strict() -> Self {
        Self {
            strict: true,
            max_fragments_per_page: 0,
        }
    }

    /// Lenient mode: malformed fragments are skipped.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            max_fragments_per_page: 0,
        }
    }

    /// Set the per-page fragment cap.
    pub fn with_max_fragments_per_page(mut self, max: usize) -> Self {
        self.max_fragments_per_page = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(TextLayerOptions::default(), TextLayerOptions::lenient());
        assert!(!TextLayerOptions::default().strict);
    }

    #[test]
    fn test_builder() {
        let opts = TextLayerOptions::strict().with_max_fragments_per_page(5);
        assert!(opts.strict);
        assert_eq!(opts.max_fragments_per_page, 5);
    }
}
