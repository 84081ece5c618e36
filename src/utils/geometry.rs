/// Geometry utilities for perspective transformations and line intersection
use crate::models::{Line, Point};

/// Denominators smaller than this mean the two lines are parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// Pivots smaller than this make the transform system singular
const SINGULAR_EPSILON: f64 = 1e-12;

/// Perspective transformation matrix (3x3, a33 fixed to 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    a11: f64,
    a12: f64,
    a13: f64,
    a21: f64,
    a22: f64,
    a23: f64,
    a31: f64,
    a32: f64,
    a33: f64,
}

impl PerspectiveTransform {
    /// Create transform mapping 4 source points onto 4 destination points
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        // Direct linear transform: two equations per correspondence
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for i in 0..4 {
            let (sx, sy) = (src[i].x as f64, src[i].y as f64);
            let (dx, dy) = (dst[i].x as f64, dst[i].y as f64);

            let row = i * 2;
            a[row] = [sx, sy, 1.0, 0.0, 0.0, 0.0, -dx * sx, -dx * sy];
            b[row] = dx;

            a[row + 1] = [0.0, 0.0, 0.0, sx, sy, 1.0, -dy * sx, -dy * sy];
            b[row + 1] = dy;
        }

        solve_linear_system(&a, &b).map(|s| Self {
            a11: s[0],
            a12: s[1],
            a13: s[2],
            a21: s[3],
            a22: s[4],
            a23: s[5],
            a31: s[6],
            a32: s[7],
            a33: 1.0,
        })
    }

    /// Map the axis-aligned rectangle `(0,0)-(width,height)` onto a
    /// quadrilateral given as (tl, tr, bl, br)
    pub fn rect_to_quad(width: f32, height: f32, quad: [Point; 4]) -> Option<Self> {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(0.0, height),
            Point::new(width, height),
        ];
        Self::from_points(&src, &quad)
    }

    /// Transform a point; `None` when it maps to infinity
    pub fn transform(&self, p: &Point) -> Option<Point> {
        let x = p.x as f64;
        let y = p.y as f64;

        let denominator = self.a31 * x + self.a32 * y + self.a33;
        if denominator.abs() < SINGULAR_EPSILON {
            return None;
        }

        let x_new = (self.a11 * x + self.a12 * y + self.a13) / denominator;
        let y_new = (self.a21 * x + self.a22 * y + self.a23) / denominator;

        Some(Point::new(x_new as f32, y_new as f32))
    }
}

/// Solve 8x8 linear system using Gaussian elimination with partial pivoting
#[allow(clippy::needless_range_loop)]
fn solve_linear_system(a: &[[f64; 8]; 8], b: &[f64; 8]) -> Option<[f64; 8]> {
    let mut a = *a;
    let mut b = *b;
    let n = 8;

    for i in 0..n {
        let mut max_val = a[i][i].abs();
        let mut max_row = i;

        for k in (i + 1)..n {
            if a[k][i].abs() > max_val {
                max_val = a[k][i].abs();
                max_row = k;
            }
        }

        if max_val < SINGULAR_EPSILON {
            return None;
        }

        if max_row != i {
            a.swap(i, max_row);
            b.swap(i, max_row);
        }

        for k in (i + 1)..n {
            let factor = a[k][i] / a[i][i];
            b[k] -= factor * b[i];

            for j in i..n {
                a[k][j] -= factor * a[i][j];
            }
        }
    }

    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}

/// Intersection of two infinite lines, `None` when they are parallel
pub fn intersection(a: &Line, b: &Line) -> Option<Point> {
    let dxa = a.start.x - a.end.x;
    let dxb = b.start.x - b.end.x;
    let dya = a.start.y - a.end.y;
    let dyb = b.start.y - b.end.y;

    let p = a.start.x * a.end.y - a.start.y * a.end.x;
    let q = b.start.x * b.end.y - b.start.y * b.end.x;
    let denom = dxa * dyb - dya * dxb;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let x = (p * dxb - dxa * q) / denom;
    let y = (p * dyb - dya * q) / denom;
    Some(Point::new(x, y))
}

/// Round to the nearest integer, halves rounding up. Truncates toward zero
/// after the shift, so values in (-1.5, -0.5] also land on 0.
pub fn round_half_up(value: f32) -> i32 {
    (value + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_transform() {
        let src = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];

        let dst = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(0.0, 50.0),
        ];

        let t = PerspectiveTransform::from_points(&src, &dst).unwrap();
        let p = t.transform(&Point::new(50.0, 50.0)).unwrap();
        assert!((p.x - 25.0).abs() < 1e-3);
        assert!((p.y - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_rect_to_quad_hits_corners() {
        let quad = [
            Point::new(10.0, 12.0),
            Point::new(210.0, 5.0),
            Point::new(14.0, 160.0),
            Point::new(205.0, 170.0),
        ];
        let t = PerspectiveTransform::rect_to_quad(816.0, 340.0, quad).unwrap();
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(816.0, 0.0),
            Point::new(0.0, 340.0),
            Point::new(816.0, 340.0),
        ];
        for (c, expected) in corners.iter().zip(quad.iter()) {
            let p = t.transform(c).unwrap();
            assert!(p.distance(expected) < 1e-2, "{:?} -> {:?}", c, p);
        }
    }

    #[test]
    fn test_degenerate_rect() {
        let quad = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        assert!(PerspectiveTransform::rect_to_quad(0.0, 10.0, quad).is_none());
    }

    #[test]
    fn test_intersection_diagonals() {
        let a = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = Line::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        let p = intersection(&a, &b).unwrap();
        assert!((p.x - 5.0).abs() < 1e-5);
        assert!((p.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_intersection_outside_segments() {
        // Lines, not segments: the crossing may lie beyond either pair of points
        let a = Line::new(Point::new(40.0, 10.0), Point::new(40.0, 90.0));
        let b = Line::new(Point::new(20.0, 3.0), Point::new(30.0, 3.0));
        let p = intersection(&a, &b).unwrap();
        assert!((p.x - 40.0).abs() < 1e-4);
        assert!((p.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_intersection_parallel() {
        let a = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let b = Line::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0));
        assert!(intersection(&a, &b).is_none());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-0.9), 0);
        assert_eq!(round_half_up(-1.6), -1);
        assert_eq!(round_half_up(0.0), 0);
    }
}
