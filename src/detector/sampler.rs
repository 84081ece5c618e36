//! Perspective re-sampling of the codeword area onto a regular bit grid.
//!
//! Every module becomes 8 samples wide and 4 samples high, enough for the
//! decoder to re-measure bar widths without another trip through the source
//! image.
//!
//! Corner x values are pixel edges while corner y values are pixel rows, so
//! the grid of an upside-down symbol reads source rows one pixel further
//! along than the grid of the same symbol upright. Grid rows that straddle a
//! symbol row boundary can therefore differ between the two orientations.

use log::debug;

use crate::error::{DetectError, Result};
use crate::models::{BinaryImage, BitMatrix, Corners, Point};
use crate::utils::geometry::PerspectiveTransform;

/// Horizontal samples per module
pub const SAMPLES_PER_MODULE_X: usize = 8;
/// Vertical samples per module
pub const SAMPLES_PER_MODULE_Y: usize = 4;

/// Build the rectifying transform for a codeword area and sample it into a
/// `dimension * 8` by `y_dimension * 4` grid
pub fn sample_lines<I: BinaryImage + ?Sized>(
    image: &I,
    area: &Corners,
    dimension: usize,
    y_dimension: usize,
) -> Result<BitMatrix> {
    let width = dimension * SAMPLES_PER_MODULE_X;
    let height = y_dimension * SAMPLES_PER_MODULE_Y;
    let transform = PerspectiveTransform::rect_to_quad(
        width as f32,
        height as f32,
        [area.top_left, area.top_right, area.bottom_left, area.bottom_right],
    )
    .ok_or(DetectError::DegenerateTransform)?;

    debug!("sampling {}x{} grid", width, height);
    sample_grid(image, width, height, &transform)
}

/// Sample `width x height` cell centres through `transform`
pub fn sample_grid<I: BinaryImage + ?Sized>(
    image: &I,
    width: usize,
    height: usize,
    transform: &PerspectiveTransform,
) -> Result<BitMatrix> {
    let mut bits = BitMatrix::new(width, height);
    for row in 0..height {
        for column in 0..width {
            let centre = Point::new(column as f32 + 0.5, row as f32 + 0.5);
            let source = transform.transform(&centre);
            let (x, y) = source
                .and_then(|p| nudge(image, p))
                .ok_or_else(|| {
                    let p = source.unwrap_or(Point::new(f32::NAN, f32::NAN));
                    DetectError::SampleOutOfBounds {
                        column,
                        row,
                        x: p.x,
                        y: p.y,
                    }
                })?;
            if image.is_black(x, y) {
                bits.set(column, row, true);
            }
        }
    }
    Ok(bits)
}

/// Truncate a source point to pixel coordinates. Points up to one pixel
/// outside the image are pulled back onto its border; anything further out
/// is rejected.
fn nudge<I: BinaryImage + ?Sized>(image: &I, p: Point) -> Option<(usize, usize)> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return None;
    }
    let (width, height) = (image.width() as i64, image.height() as i64);
    if width == 0 || height == 0 {
        return None;
    }
    let x = p.x as i64;
    let y = p.y as i64;
    if x < -1 || x > width || y < -1 || y > height {
        return None;
    }
    Some((x.clamp(0, width - 1) as usize, y.clamp(0, height - 1) as usize))
}
