//! Geometric primitives for highlight placement.
//!
//! All page-space types use PDF user space: the origin is at the bottom-left
//! of the page and Y increases upward. Viewport (Y-down) conversion lives in
//! [`crate::viewport`].

use serde::{Deserialize, Serialize};

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page space.
///
/// `top` is the larger Y value and `bottom` the smaller one, matching PDF
/// user space. Serializes as `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// Minimum X
    pub left: f32,
    /// Maximum Y
    pub top: f32,
    /// Maximum X
    pub right: f32,
    /// Minimum Y
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::Rect;
    ///
    /// let rect = Rect::new(50.0, 712.0, 110.0, 700.0);
    /// assert_eq!(rect.width(), 60.0);
    /// assert_eq!(rect.height(), 12.0);
    /// ```
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.left, r.top, r.right, r.bottom]
    }
}

/// A 2D affine transformation matrix.
///
/// PDF uses matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Where (a,b,c,d) define scaling/rotation/skewing and (e,f) define translation.
/// Serializes as the six-element array `[a, b, c, d, e, f]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 6]", into = "[f32; 6]")]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.a, 1.0);
    /// assert_eq!(m.d, 1.0);
    /// assert_eq!(m.e, 0.0);
    /// ```
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a counter-clockwise rotation matrix (angle in degrees).
    pub fn rotation(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Build a matrix from a loosely-typed component slice.
    ///
    /// Returns `None` unless the slice has exactly six elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::Matrix;
    ///
    /// assert!(Matrix::from_slice(&[1.0, 0.0, 0.0, 1.0, 50.0, 700.0]).is_some());
    /// assert!(Matrix::from_slice(&[1.0, 0.0, 0.0, 1.0]).is_none());
    /// ```
    pub fn from_slice(v: &[f32]) -> Option<Self> {
        let arr: [f32; 6] = v.try_into().ok()?;
        Some(arr.into())
    }

    /// Multiply this matrix with another matrix.
    ///
    /// The result represents first applying `self`, then applying `other`.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    ///
    /// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::Matrix;
    ///
    /// let m = Matrix::translation(10.0, 20.0);
    /// let p = m.transform_point(5.0, 10.0);
    /// assert_eq!(p.x, 15.0);
    /// assert_eq!(p.y, 30.0);
    /// ```
    pub fn transform_point(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.a * x + self.c * y + self.e,
            y: self.b * x + self.d * y + self.f,
        }
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 6]> for Matrix {
    fn from(v: [f32; 6]) -> Self {
        Matrix::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<Matrix> for [f32; 6] {
    fn from(m: Matrix) -> Self {
        [m.a, m.b, m.c, m.d, m.e, m.f]
    }
}

/// Flat quad-point array: `[x1, y1, x2, y2, x3, y3, x4, y4]`.
pub type QuadPoints = [f32; 8];

/// A possibly rotated or skewed quadrilateral in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Transformed local (start, baseline) corner
    pub bottom_left: Point,
    /// Transformed local (end, baseline) corner
    pub bottom_right: Point,
    /// Transformed local (start, ascent) corner
    pub top_left: Point,
    /// Transformed local (end, ascent) corner
    pub top_right: Point,
}

impl Quad {
    /// Map the local box `[x0, x1] x [0, height]` through `m`.
    pub fn from_local_box(m: &Matrix, x0: f32, x1: f32, height: f32) -> Self {
        Self {
            bottom_left: m.transform_point(x0, 0.0),
            bottom_right: m.transform_point(x1, 0.0),
            top_left: m.transform_point(x0, height),
            top_right: m.transform_point(x1, height),
        }
    }

    /// Corners in bottom-left, bottom-right, top-left, top-right order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.bottom_left,
            self.bottom_right,
            self.top_left,
            self.top_right,
        ]
    }

    /// Flatten to the highlight quad-point layout (BL, BR, TL, TR).
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_locate::geometry::{Matrix, Quad};
    ///
    /// let quad = Quad::from_local_box(&Matrix::translation(50.0, 700.0), 0.0, 60.0, 12.0);
    /// assert_eq!(
    ///     quad.to_quad_points(),
    ///     [50.0, 700.0, 110.0, 700.0, 50.0, 712.0, 110.0, 712.0]
    /// );
    /// ```
    pub fn to_quad_points(&self) -> QuadPoints {
        let [bl, br, tl, tr] = self.corners();
        [bl.x, bl.y, br.x, br.y, tl.x, tl.y, tr.x, tr.y]
    }

    /// Rebuild a quad from a flat quad-point array.
    pub fn from_quad_points(q: &QuadPoints) -> Self {
        Self {
            bottom_left: Point::new(q[0], q[1]),
            bottom_right: Point::new(q[2], q[3]),
            top_left: Point::new(q[4], q[5]),
            top_right: Point::new(q[6], q[7]),
        }
    }

    /// True when every corner has finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.corners()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Axis-aligned envelope of the four corners.
    pub fn bounding_rect(&self) -> Rect {
        let [bl, br, tl, tr] = self.corners();
        Rect {
            left: bl.x.min(br.x).min(tl.x).min(tr.x),
            top: bl.y.max(br.y).max(tl.y).max(tr.y),
            right: bl.x.max(br.x).max(tl.x).max(tr.x),
            bottom: bl.y.min(br.y).min(tl.y).min(tr.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_point_creation() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_rect_extents() {
        let r = Rect::new(10.0, 70.0, 110.0, 20.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }

    #[test]
    fn test_rect_serializes_as_array() {
        let r = Rect::new(1.0, 4.0, 3.0, 2.0);
        assert_eq!(serde_json::to_string(&r).unwrap(), "[1.0,4.0,3.0,2.0]");
        let back: Rect = serde_json::from_str("[1.0,4.0,3.0,2.0]").unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_matrix_transform() {
        let m = Matrix::new(2.0, 0.0, 0.0, 3.0, 10.0, 20.0);
        let p = m.transform_point(1.0, 1.0);
        assert_eq!(p, Point::new(12.0, 23.0));
    }

    #[test]
    fn test_matrix_multiply_order() {
        let scale = Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        let shift = Matrix::translation(10.0, 0.0);
        // scale first, then shift
        let m = scale.multiply(&shift);
        assert_eq!(m.transform_point(1.0, 1.0), Point::new(12.0, 2.0));
        // shift first, then scale
        let m = shift.multiply(&scale);
        assert_eq!(m.transform_point(1.0, 1.0), Point::new(22.0, 2.0));
    }

    #[test]
    fn test_matrix_rotation() {
        let m = Matrix::rotation(90.0);
        let p = m.transform_point(1.0, 0.0);
        assert!(approx(p.x, 0.0));
        assert!(approx(p.y, 1.0));
        let p = m.transform_point(0.0, 1.0);
        assert!(approx(p.x, -1.0));
        assert!(approx(p.y, 0.0));
    }

    #[test]
    fn test_matrix_is_finite() {
        assert!(Matrix::identity().is_finite());
        assert!(!Matrix::new(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0).is_finite());
        assert!(!Matrix::translation(f32::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_matrix_from_slice_length() {
        assert_eq!(
            Matrix::from_slice(&[1.0, 0.0, 0.0, 1.0, 5.0, 6.0]),
            Some(Matrix::translation(5.0, 6.0))
        );
        assert!(Matrix::from_slice(&[]).is_none());
        assert!(Matrix::from_slice(&[1.0; 7]).is_none());
    }

    #[test]
    fn test_quad_keeps_skew() {
        // Shear: x' = x + 0.5*y
        let m = Matrix::new(1.0, 0.0, 0.5, 1.0, 0.0, 0.0);
        let quad = Quad::from_local_box(&m, 0.0, 10.0, 4.0);
        assert_eq!(quad.top_left, Point::new(2.0, 4.0));
        assert_eq!(quad.bottom_left, Point::new(0.0, 0.0));

        let rect = quad.bounding_rect();
        assert_eq!(rect, Rect::new(0.0, 4.0, 12.0, 0.0));
        // The envelope is wider than the quad's bottom edge
        assert!(rect.width() > quad.bottom_right.x - quad.bottom_left.x);
    }

    #[test]
    fn test_quad_is_finite() {
        assert!(Quad::from_local_box(&Matrix::identity(), 0.0, 10.0, 5.0).is_finite());
        let overflow = Quad::from_local_box(&Matrix::new(4.0, 0.0, 0.0, 1.0, 0.0, 0.0), 0.0, f32::MAX, 5.0);
        assert!(overflow.bottom_right.x.is_infinite());
        assert!(!overflow.is_finite());
    }

    #[test]
    fn test_quad_points_roundtrip_order() {
        let quad = Quad::from_local_box(&Matrix::identity(), 1.0, 2.0, 3.0);
        let flat = quad.to_quad_points();
        assert_eq!(flat, [1.0, 0.0, 2.0, 0.0, 1.0, 3.0, 2.0, 3.0]);
        assert_eq!(Quad::from_quad_points(&flat), quad);
    }
}
