//! Conversion from PDF user space to viewport space.
//!
//! Search results are in PDF user space (origin bottom-left, Y up). Overlay
//! renderers usually want the opposite: origin top-left, Y down, scaled by
//! the zoom factor.

use crate::geometry::{Point, QuadPoints, Rect};
use serde::Serialize;

/// A scaled, Y-flipped view of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Page height in user space units
    pub page_height: f32,
    /// Zoom factor (1.0 = one viewport unit per user space unit)
    pub scale: f32,
    /// User space X that maps to viewport x = 0
    pub offset_x: f32,
    /// User space Y (from the bottom) cropped off the bottom of the page
    pub offset_y: f32,
}

/// A rectangle in viewport space: top-left origin, Y down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Viewport {
    /// Unscaled viewport for a page of the given height.
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Set the zoom factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the user space origin (e.g. the lower-left corner of a crop box).
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Map a page-space point into the viewport.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::Point;
    /// use pdf_locate::viewport::Viewport;
    ///
    /// let vp = Viewport::new(792.0).with_scale(2.0);
    /// assert_eq!(vp.convert_point(&Point::new(50.0, 700.0)), Point::new(100.0, 184.0));
    /// ```
    pub fn convert_point(&self, p: &Point) -> Point {
        Point {
            x: (p.x - self.offset_x) * self.scale,
            y: (self.page_height - (p.y - self.offset_y)) * self.scale,
        }
    }

    /// Map a page-space rect into a viewport box.
    ///
    /// The page-space `top` (max Y) becomes the box's upper edge.
    pub fn convert_rect(&self, rect: &Rect) -> ViewportBox {
        let top_left = self.convert_point(&Point::new(rect.left, rect.top));
        let bottom_right = self.convert_point(&Point::new(rect.right, rect.bottom));
        ViewportBox {
            x: top_left.x,
            y: top_left.y,
            width: bottom_right.x - top_left.x,
            height: bottom_right.y - top_left.y,
        }
    }

    /// Map every corner of a quad-point array, keeping the corner order.
    pub fn convert_quad_points(&self, quad: &QuadPoints) -> QuadPoints {
        let mut out = [0.0; 8];
        for (src, dst) in quad.chunks_exact(2).zip(out.chunks_exact_mut(2)) {
            let p = self.convert_point(&Point::new(src[0], src[1]));
            dst[0] = p.x;
            dst[1] = p.y;
        }
        out
    }
}
