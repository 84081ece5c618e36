/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` of the way from `self` to `other`
    pub fn lerp(&self, other: &Point, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Line through two points, used for intersection only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// First point on the line
    pub start: Point,
    /// Second point on the line
    pub end: Point,
}

impl Line {
    /// Create a line through `start` and `end`
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}
