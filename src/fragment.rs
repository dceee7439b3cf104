//! Text fragments as handed over by the PDF parsing collaborator.
//!
//! A fragment is a contiguous run of text laid out by the renderer together
//! with its local extent and the affine transform placing it on the page.
//! Parsers tend to produce loosely-typed records (missing fields, transforms
//! of the wrong length, zero widths), so the wire form [`RawTextFragment`] is
//! validated into a [`TextFragment`] at the boundary.

use crate::geometry::Matrix;
use serde::{Deserialize, Serialize};

/// A validated text fragment.
///
/// `width` and `height` are in the fragment's local (pre-transform) space.
/// `height` approximates the font ascent; no descent is modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Text content as laid out on the page
    pub text: String,
    /// Local advance width of the whole run
    pub width: f32,
    /// Local height above the baseline
    pub height: f32,
    /// Local-to-page transform
    pub transform: Matrix,
}

impl TextFragment {
    /// Create a fragment.
    ///
    /// No validation happens here; the searcher skips fragments for which
    /// [`TextFragment::check`] fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::fragment::TextFragment;
    /// use pdf_locate::geometry::Matrix;
    ///
    /// let frag = TextFragment::new("Senior Rockstar Engineer", 240.0, 12.0, Matrix::translation(50.0, 700.0));
    /// assert!(frag.is_searchable());
    /// ```
    pub fn new(text: impl Into<String>, width: f32, height: f32, transform: Matrix) -> Self {
        Self {
            text: text.into(),
            width,
            height,
            transform,
        }
    }

    /// Check that the fragment can carry highlight geometry.
    pub fn check(&self) -> Result<(), FragmentDefect> {
        if self.text.is_empty() {
            return Err(FragmentDefect::EmptyText);
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(FragmentDefect::NonFiniteExtent);
        }
        if self.width <= 0.0 {
            return Err(FragmentDefect::NonPositiveWidth(self.width));
        }
        if !self.transform.is_finite() {
            return Err(FragmentDefect::NonFiniteTransform);
        }
        Ok(())
    }

    /// True if [`TextFragment::check`] passes.
    pub fn is_searchable(&self) -> bool {
        self.check().is_ok()
    }
}

/// Why a fragment cannot be searched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FragmentDefect {
    /// No text field at all
    #[error("missing text")]
    MissingText,
    /// Text is the empty string
    #[error("empty text")]
    EmptyText,
    /// No width field
    #[error("missing width")]
    MissingWidth,
    /// Width is zero or negative
    #[error("non-positive width {0}")]
    NonPositiveWidth(f32),
    /// Width or height is NaN or infinite
    #[error("non-finite width or height")]
    NonFiniteExtent,
    /// Transform absent
    #[error("missing transform")]
    MissingTransform,
    /// Transform does not have exactly six components
    #[error("transform has {0} components, expected 6")]
    TransformLength(usize),
    /// Transform contains NaN or infinite components
    #[error("non-finite transform component")]
    NonFiniteTransform,
    /// A field holds a JSON value of the wrong type
    #[error("{0} has the wrong type")]
    WrongType(&'static str),
}

/// A raw field value: either the expected type or whatever JSON was found.
///
/// Keeps one mistyped field (`"width": "50"`, a `null` inside `transform`)
/// from failing the whole text layer at parse time. The fragment is
/// rejected later, in [`RawTextFragment::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField<T> {
    /// Value of the expected type
    Valid(T),
    /// Any other JSON value
    Invalid(serde_json::Value),
}

impl<T> RawField<T> {
    fn into_valid(self, field: &'static str) -> Result<T, FragmentDefect> {
        match self {
            RawField::Valid(v) => Ok(v),
            RawField::Invalid(_) => Err(FragmentDefect::WrongType(field)),
        }
    }
}

impl<T> From<T> for RawField<T> {
    fn from(v: T) -> Self {
        RawField::Valid(v)
    }
}

/// Loosely-typed fragment as emitted by pdf.js-style text extraction.
///
/// Every field is optional; `str` is accepted as an alias for `text`.
/// A missing or `null` `height` is treated as zero. Values of the wrong
/// type are kept as [`RawField::Invalid`] and reported by `validate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTextFragment {
    /// Text content
    #[serde(alias = "str")]
    pub text: Option<RawField<String>>,
    /// Local width
    pub width: Option<RawField<f32>>,
    /// Local height
    pub height: Option<RawField<f32>>,
    /// Transform components, expected `[a, b, c, d, e, f]`
    pub transform: Option<RawField<Vec<f32>>>,
}

impl RawTextFragment {
    /// Validate into a [`TextFragment`].
    pub fn validate(self) -> Result<TextFragment, FragmentDefect> {
        let text = self
            .text
            .ok_or(FragmentDefect::MissingText)?
            .into_valid("text")?;
        let width = self
            .width
            .ok_or(FragmentDefect::MissingWidth)?
            .into_valid("width")?;
        let height = match self.height {
            Some(h) => h.into_valid("height")?,
            None => 0.0,
        };
        let components = self
            .transform
            .ok_or(FragmentDefect::MissingTransform)?
            .into_valid("transform")?;
        let transform = Matrix::from_slice(&components)
            .ok_or(FragmentDefect::TransformLength(components.len()))?;

        let fragment = TextFragment {
            text,
            width,
            height,
            transform,
        };
        fragment.check()?;
        Ok(fragment)
    }
}

impl From<TextFragment> for RawTextFragment {
    fn from(f: TextFragment) -> Self {
        let components: [f32; 6] = f.transform.into();
        Self {
            text: Some(f.text.into()),
            width: Some(f.width.into()),
            height: Some(f.height.into()),
            transform: Some(components.to_vec().into()),
        }
    }
}
