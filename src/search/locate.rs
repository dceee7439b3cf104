//! Sub-span geometry within a single fragment.
//!
//! Characters are assumed to be spread uniformly across the fragment's local
//! width: a match covering chars `[start, end)` of an `n`-char fragment spans
//! local X from `start / n * width` to `end / n * width`. Kerning, ligatures
//! and proportional glyph widths are ignored, so highlights in text with very
//! uneven glyph widths (e.g. "iiiiWWWW") drift. Per-glyph widths are not part
//! of the text layer, so nothing better is possible here.
//!
//! Vertically the box runs from the baseline (local y = 0) up to `height`.
//! Descenders are not covered.

use crate::fragment::TextFragment;
use crate::geometry::{Quad, Rect};

/// Page-space geometry of one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    /// Axis-aligned envelope of `quad`
    pub rect: Rect,
    /// Transformed corners of the local sub-span box
    pub quad: Quad,
}

/// Compute the page-space highlight for chars `[start, end)` of `fragment`.
///
/// `char_len` is the fragment's length in chars. Returns `None` when the
/// span is empty or out of range, when the fragment cannot carry geometry,
/// or when a transformed corner is not a finite number.
///
/// # Examples
///
/// ```
/// use pdf_locate::fragment::TextFragment;
/// use pdf_locate::geometry::{Matrix, Rect};
/// use pdf_locate::search::locate_span;
///
/// let frag = TextFragment::new("Senior Rockstar Engineer", 240.0, 12.0, Matrix::translation(50.0, 700.0));
/// let hl = locate_span(&frag, 24, 7, 15).unwrap();
/// assert_eq!(hl.rect, Rect::new(120.0, 712.0, 200.0, 700.0));
/// ```
pub fn locate_span(
    fragment: &TextFragment,
    char_len: usize,
    start: usize,
    end: usize,
) -> Option<Highlight> {
    if char_len == 0 || start >= end || end > char_len {
        return None;
    }
    if fragment.check().is_err() {
        return None;
    }

    let len = char_len as f32;
    let x0 = start as f32 / len * fragment.width;
    let x1 = end as f32 / len * fragment.width;

    let quad = Quad::from_local_box(&fragment.transform, x0, x1, fragment.height);
    // Finite inputs can still overflow once scaled by the transform.
    if !quad.is_finite() {
        return None;
    }
    Some(Highlight {
        rect: quad.bounding_rect(),
        quad,
    })
}
