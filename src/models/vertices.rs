//! Symbol geometry collected while locating and correcting a PDF417 symbol.
//!
//! The detector works with sixteen points whose meaning is fixed by position:
//!
//! | index | meaning |
//! |-------|---------|
//! | 0-3   | outer barcode corners (tl, bl, tr, br) |
//! | 4-7   | codeword area corners from the guard scan (tl, bl, tr, br) |
//! | 8-11  | upper/lower border of the left wide bar, then of the right one |
//! | 12-15 | corrected codeword area corners (tl, bl, tr, br) |
//!
//! Instead of sixteen nullable slots the groups are separate types: a
//! [`GuardVertices`] only exists once all eight guard corners were found, and a
//! [`VertexSet`] only exists once correction succeeded.

use std::fmt;

use super::Point;

/// Which of the two guard patterns a measurement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Start pattern side
    Left,
    /// Stop pattern side
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Corner of a quadrilateral, in the symbol's own reading frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top left
    TopLeft,
    /// Bottom left
    BottomLeft,
    /// Top right
    TopRight,
    /// Bottom right
    BottomRight,
}

impl Corner {
    /// All corners in vertex-set order (tl, bl, tr, br)
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::BottomLeft,
        Corner::TopRight,
        Corner::BottomRight,
    ];

    /// Guard pattern side this corner sits on
    pub fn side(self) -> Side {
        match self {
            Corner::TopLeft | Corner::BottomLeft => Side::Left,
            Corner::TopRight | Corner::BottomRight => Side::Right,
        }
    }

    /// Whether this is one of the two top corners
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corner::TopLeft => "top-left",
            Corner::BottomLeft => "bottom-left",
            Corner::TopRight => "top-right",
            Corner::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

/// How the symbol sits in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Start pattern on the left, rows read left to right
    #[default]
    Normal,
    /// Symbol turned by 180 degrees
    Rotated180,
}

impl Orientation {
    /// Whether the symbol is upside down
    pub fn is_upside_down(self) -> bool {
        self == Orientation::Rotated180
    }
}

/// Four points of a quadrilateral, one per [`Corner`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corners {
    /// Top left
    pub top_left: Point,
    /// Bottom left
    pub bottom_left: Point,
    /// Top right
    pub top_right: Point,
    /// Bottom right
    pub bottom_right: Point,
}

impl Corners {
    /// Point for one corner
    pub fn get(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::BottomLeft => self.bottom_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Mutable access to one corner
    pub fn get_mut(&mut self, corner: Corner) -> &mut Point {
        match corner {
            Corner::TopLeft => &mut self.top_left,
            Corner::BottomLeft => &mut self.bottom_left,
            Corner::TopRight => &mut self.top_right,
            Corner::BottomRight => &mut self.bottom_right,
        }
    }

    /// Points in vertex-set order (tl, bl, tr, br)
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.bottom_left,
            self.top_right,
            self.bottom_right,
        ]
    }
}

/// Vertices 0-7: outer barcode corners and the codeword area corners seen by
/// the guard pattern scan. Found all together or not at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardVertices {
    /// Vertices 0-3
    pub barcode: Corners,
    /// Vertices 4-7
    pub codeword: Corners,
}

/// The complete sixteen-point geometry of a located symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSet {
    /// Vertices 0-7
    pub guards: GuardVertices,
    /// Vertices 8-11: tl/bl are the upper and lower border of the left wide
    /// bar, tr/br the same for the right wide bar
    pub wide_bars: Corners,
    /// Vertices 12-15, the only ones the sampler reads
    pub codeword_area: Corners,
}

impl VertexSet {
    /// Number of indexed vertices
    pub const COUNT: usize = 16;

    /// Indexed view, see the module docs for the meaning of each slot
    pub fn to_array(&self) -> [Point; Self::COUNT] {
        let mut out = [Point::default(); Self::COUNT];
        let groups = [
            self.guards.barcode,
            self.guards.codeword,
            self.wide_bars,
            self.codeword_area,
        ];
        for (chunk, group) in out.chunks_exact_mut(4).zip(groups.iter()) {
            chunk.copy_from_slice(&group.to_array());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(base: f32) -> Corners {
        Corners {
            top_left: Point::new(base, 0.0),
            bottom_left: Point::new(base, 1.0),
            top_right: Point::new(base, 2.0),
            bottom_right: Point::new(base, 3.0),
        }
    }

    #[test]
    fn test_vertex_set_index_layout() {
        let set = VertexSet {
            guards: GuardVertices {
                barcode: corners(0.0),
                codeword: corners(4.0),
            },
            wide_bars: corners(8.0),
            codeword_area: corners(12.0),
        };
        let slots = set.to_array();
        for (i, p) in slots.iter().enumerate() {
            assert_eq!(p.x as usize + p.y as usize, i, "slot {}", i);
        }
    }

    #[test]
    fn test_corner_sides() {
        assert_eq!(Corner::TopLeft.side(), Side::Left);
        assert_eq!(Corner::BottomRight.side(), Side::Right);
        assert!(Corner::TopRight.is_top());
        assert!(!Corner::BottomLeft.is_top());
        assert_eq!(Corner::BottomRight.to_string(), "bottom-right");
    }

    #[test]
    fn test_corners_get_mut() {
        let mut c = Corners::default();
        *c.get_mut(Corner::TopRight) = Point::new(3.0, 4.0);
        assert_eq!(c.get(Corner::TopRight), Point::new(3.0, 4.0));
        assert_eq!(c.to_array()[2], Point::new(3.0, 4.0));
    }
}
