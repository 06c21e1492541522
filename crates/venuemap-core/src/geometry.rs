//! Polygon geometry for map areas.
//!
//! All functions operate on the coordinates they are handed; callers decide
//! whether those are template design-space or surface units.

use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};

/// Signed areas smaller than this are treated as degenerate.
const AREA_EPSILON: f64 = 1e-9;

/// Whether a vertex list can be filled and labeled.
pub fn is_valid_polygon(vertices: &[Point]) -> bool {
    vertices.len() >= 3 && vertices.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}

/// Signed area of a polygon (positive for counter-clockwise winding in a y-up system).
pub fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Area-weighted centroid of a simple polygon.
///
/// Collinear or otherwise zero-area input falls back to the vertex mean.
pub fn polygon_centroid(vertices: &[Point]) -> Option<Point> {
    if !is_valid_polygon(vertices) {
        return None;
    }

    let n = vertices.len();
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area2 += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    let signed = area2 * 0.5;
    if signed.abs() < AREA_EPSILON {
        return Some(vertex_mean(vertices));
    }
    Some(Point::new(cx / (6.0 * signed), cy / (6.0 * signed)))
}

/// Arithmetic mean of the vertices.
pub fn vertex_mean(vertices: &[Point]) -> Point {
    if vertices.is_empty() {
        return Point::ZERO;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Axis-aligned bounding box of the vertices.
pub fn polygon_bounds(vertices: &[Point]) -> Option<Rect> {
    if vertices.is_empty() {
        return None;
    }
    let min_x = vertices.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = vertices.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Some(Rect::new(min_x, min_y, max_x, max_y))
}

/// Midpoint between the leftmost and rightmost vertices.
///
/// Ties keep the first vertex encountered.
pub fn widest_chord_midpoint(vertices: &[Point]) -> Option<Point> {
    let first = *vertices.first()?;
    let mut left = first;
    let mut right = first;
    for &p in &vertices[1..] {
        if p.x < left.x {
            left = p;
        }
        if p.x > right.x {
            right = p;
        }
    }
    Some(left.midpoint(right))
}

/// Closed path through the transformed vertices.
pub fn polygon_path(vertices: &[Point], transform: Affine) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = vertices.iter();
    if let Some(&first) = iter.next() {
        path.move_to(transform * first);
        for &p in iter {
            path.line_to(transform * p);
        }
        path.close_path();
    }
    path
}

/// Non-zero winding point-in-polygon test.
pub fn contains_point(vertices: &[Point], point: Point) -> bool {
    if !is_valid_polygon(vertices) {
        return false;
    }
    polygon_path(vertices, Affine::IDENTITY).winding(point) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ]
    }

    #[test]
    fn test_square_centroid() {
        let c = polygon_centroid(&square(10.0)).unwrap();
        assert!((c.x - 5.0).abs() < 1e-10);
        assert!((c.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_centroid_independent_of_winding() {
        let mut vertices = square(10.0);
        vertices.reverse();
        let c = polygon_centroid(&vertices).unwrap();
        assert!((c.x - 5.0).abs() < 1e-10);
        assert!((c.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        // L-shape: mean of vertices differs from the true centroid.
        let vertices = vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 20.0),
            Point::new(0.0, 20.0),
        ];
        let c = polygon_centroid(&vertices).unwrap();
        // Two 10x10 squares at (5,5),(15,5) plus one at (5,15): mean of the three.
        assert!((c.x - 25.0 / 3.0).abs() < 1e-10);
        assert!((c.y - 25.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_centroid_degenerate() {
        let collinear = vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0)];
        let c = polygon_centroid(&collinear).unwrap();
        assert!((c.x - 5.0).abs() < 1e-10);
        assert!(c.y.abs() < 1e-10);

        assert!(polygon_centroid(&[Point::ZERO, Point::new(1.0, 1.0)]).is_none());
        assert!(polygon_centroid(&[Point::ZERO, Point::new(f64::NAN, 1.0), Point::new(1.0, 0.0)]).is_none());
    }

    #[test]
    fn test_signed_area() {
        assert!((signed_area(&square(10.0)) - 100.0).abs() < 1e-10);
        let mut reversed = square(10.0);
        reversed.reverse();
        assert!((signed_area(&reversed) + 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_bounds() {
        let bounds = polygon_bounds(&[Point::new(3.0, 7.0), Point::new(-1.0, 2.0), Point::new(8.0, 4.0)]).unwrap();
        assert_eq!(bounds, Rect::new(-1.0, 2.0, 8.0, 7.0));
        assert!(polygon_bounds(&[]).is_none());
    }

    #[test]
    fn test_widest_chord_midpoint() {
        let vertices = vec![
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(100.0, 20.0),
            Point::new(60.0, 40.0),
        ];
        let mid = widest_chord_midpoint(&vertices).unwrap();
        assert!((mid.x - 50.0).abs() < 1e-10);
        assert!((mid.y - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_polygon_path_is_closed() {
        let path = polygon_path(&square(10.0), Affine::scale(2.0));
        let elements = path.elements();
        assert_eq!(elements.len(), 5);
        assert!(matches!(elements[2], kurbo::PathEl::LineTo(p) if p == Point::new(20.0, 20.0)));
        assert!(matches!(elements[4], kurbo::PathEl::ClosePath));
    }

    #[test]
    fn test_contains_point() {
        let vertices = square(10.0);
        assert!(contains_point(&vertices, Point::new(5.0, 5.0)));
        assert!(!contains_point(&vertices, Point::new(15.0, 5.0)));
        assert!(!contains_point(&vertices[..2], Point::new(5.0, 0.0)));
    }
}
