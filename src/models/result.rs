use super::{BitMatrix, Orientation, Point, VertexSet};

/// A located and rectified PDF417 symbol
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorResult {
    /// Oversampled bit grid: 8 samples per module horizontally, 4 per
    /// module vertically (true = black)
    pub bits: BitMatrix,
    /// Corners of `bits` in output space: tl, tr, bl, br
    pub points: [Point; 4],
    /// Orientation the symbol was found in
    pub orientation: Orientation,
    /// Estimated module width in source pixels
    pub module_width: f32,
    /// Modules per row of the codeword area, always a multiple of 17
    pub dimension: usize,
    /// Module rows used for sampling
    pub y_dimension: usize,
    /// Full symbol geometry in source image coordinates
    pub vertices: VertexSet,
}

impl DetectorResult {
    /// Output-space corners of a `width x height` grid (tl, tr, bl, br)
    pub fn grid_corners(width: usize, height: usize) -> [Point; 4] {
        let w = width as f32;
        let h = height as f32;
        [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(0.0, h),
            Point::new(w, h),
        ]
    }
}
