//! Refine the codeword area corners (vertices 8-15).
//!
//! The guard scans only sample every few rows, so vertices 4-7 may sit up to
//! one row step inside the symbol. The wide bar of each guard pattern is
//! followed up or down pixel by pixel to find the true top and bottom rows,
//! and the codeword area corners are rebuilt by crossing the inner guard
//! edges with the lines through those wide bar ends.

use log::debug;

use crate::config::DetectOptions;
use crate::error::{DetectError, Result};
use crate::models::{BinaryImage, Corner, Corners, GuardVertices, Line, Orientation, Point, Side, VertexSet};
use crate::utils::geometry::{intersection, round_half_up};

/// Position of a guard pattern's wide bar, in modules from the outer edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideBar {
    /// First module of the bar
    pub start: u32,
    /// Bar width in modules
    pub len: u32,
    /// Modules in the whole guard pattern
    pub pattern_len: u32,
}

/// The 8-module bar opening the start pattern
pub const LEFT_WIDE_BAR: WideBar = WideBar {
    start: 0,
    len: 8,
    pattern_len: 17,
};

/// The 7-module bar opening the stop pattern, counted from its outer edge
pub const RIGHT_WIDE_BAR: WideBar = WideBar {
    start: 11,
    len: 7,
    pattern_len: 18,
};

/// Pixel test that treats everything outside the image as white
fn black_at<I: BinaryImage + ?Sized>(image: &I, x: isize, y: isize) -> bool {
    x >= 0
        && y >= 0
        && (x as usize) < image.width()
        && (y as usize) < image.height()
        && image.is_black(x as usize, y as usize)
}

/// Reject guard sightings whose inner corners are too close vertically
pub fn check_guard_separation(guards: &GuardVertices, min_separation: f32) -> Result<()> {
    let sides = [
        (Side::Left, guards.codeword.top_left, guards.codeword.bottom_left),
        (Side::Right, guards.codeword.top_right, guards.codeword.bottom_right),
    ];
    for (side, top, bottom) in sides {
        let separation = (top.y - bottom.y).abs();
        if separation < min_separation {
            debug!("{} guard spans only {:.1} px", side, separation);
            return Err(DetectError::InsufficientGuardSeparation {
                side,
                separation,
                required: min_separation,
            });
        }
    }
    Ok(())
}

/// Follow a wide guard bar vertically from a preliminary corner until the bar
/// (or the thin bar next to it) ends.
///
/// `outer` and `inner` are the guard pattern's outer and codeword-side
/// corners on one scan row. `row_step` is -1 to walk toward the top of the
/// image and +1 toward the bottom. `reading_dir` is +1 when the symbol reads
/// left to right in the image and -1 when it is upside down; the thin bar
/// used as a second witness lies on that side of the wide bar.
pub fn find_wide_bar_top_bottom<I: BinaryImage + ?Sized>(
    image: &I,
    outer: Point,
    inner: Point,
    bar: WideBar,
    row_step: isize,
    reading_dir: isize,
    skew_tolerance: usize,
) -> Point {
    let width = image.width() as isize;
    let height = image.height() as isize;

    let pattern_len = bar.pattern_len as f32;
    let bar_start = outer.lerp(&inner, bar.start as f32 / pattern_len).x;
    let bar_end = outer.lerp(&inner, (bar.start + bar.len) as f32 / pattern_len).x;
    let mut x = round_half_up((bar_start + bar_end) / 2.0) as isize;

    let y_start = round_half_up(outer.y) as isize;
    let mut y = y_start;

    // First white-to-black edge past the wide bar in reading direction
    let mut next = if reading_dir > 0 {
        (bar_start.max(bar_end) + 1.0) as isize
    } else {
        (bar_start.min(bar_end) - 1.0).ceil() as isize
    };
    while next >= 0 && next < width {
        if !black_at(image, next - reading_dir, y) && black_at(image, next, y) {
            break;
        }
        next += reading_dir;
    }
    let thin_offset = next - x;

    loop {
        if black_at(image, x, y) {
            let thin = x + thin_offset;
            let thin_ended =
                !black_at(image, thin, y) && !black_at(image, thin + reading_dir, y);
            y += row_step;
            if thin_ended || y <= 0 || y >= height - 1 {
                break;
            }
            continue;
        }

        // The bar may have drifted sideways on a skewed symbol
        let shifted = (1..=skew_tolerance as isize)
            .flat_map(|d| [x - d, x + d])
            .find(|&nx| black_at(image, nx, y));
        match shifted {
            Some(nx) => x = nx,
            None => {
                if y != y_start {
                    y -= row_step;
                }
                break;
            }
        }
    }

    Point::new(x as f32, y as f32)
}

/// Cross two lines and check that the result lands inside the image
pub fn find_crossing_point<I: BinaryImage + ?Sized>(
    image: &I,
    corner: Corner,
    a: &Line,
    b: &Line,
) -> Result<Point> {
    let p = intersection(a, b).ok_or(DetectError::ParallelLinesNoCrossing { corner })?;

    let (width, height) = (image.width(), image.height());
    let x = round_half_up(p.x);
    let y = round_half_up(p.y);
    let inside = p.x.is_finite()
        && p.y.is_finite()
        && x >= 0
        && y >= 0
        && (x as usize) < width
        && (y as usize) < height;
    if !inside {
        return Err(DetectError::CrossingOutOfBounds {
            corner,
            x: p.x,
            y: p.y,
            width,
            height,
        });
    }
    Ok(p)
}

/// Refine preliminary guard vertices into the full sixteen-point geometry
pub fn correct_vertices<I: BinaryImage + ?Sized>(
    image: &I,
    guards: &GuardVertices,
    orientation: Orientation,
    options: &DetectOptions,
) -> Result<VertexSet> {
    check_guard_separation(guards, options.min_guard_separation)?;

    let (toward_top, reading_dir) = if orientation.is_upside_down() {
        (1, -1)
    } else {
        (-1, 1)
    };

    let mut wide_bars = Corners::default();
    for corner in Corner::ALL {
        let bar = match corner.side() {
            Side::Left => LEFT_WIDE_BAR,
            Side::Right => RIGHT_WIDE_BAR,
        };
        let row_step = if corner.is_top() { toward_top } else { -toward_top };
        *wide_bars.get_mut(corner) = find_wide_bar_top_bottom(
            image,
            guards.barcode.get(corner),
            guards.codeword.get(corner),
            bar,
            row_step,
            reading_dir,
            options.skew_tolerance,
        );
    }

    let left_edge = Line::new(guards.codeword.top_left, guards.codeword.bottom_left);
    let right_edge = Line::new(guards.codeword.top_right, guards.codeword.bottom_right);
    let top_edge = Line::new(wide_bars.top_left, wide_bars.top_right);
    let bottom_edge = Line::new(wide_bars.bottom_left, wide_bars.bottom_right);

    let codeword_area = Corners {
        top_left: find_crossing_point(image, Corner::TopLeft, &left_edge, &top_edge)?,
        bottom_left: find_crossing_point(image, Corner::BottomLeft, &left_edge, &bottom_edge)?,
        top_right: find_crossing_point(image, Corner::TopRight, &right_edge, &top_edge)?,
        bottom_right: find_crossing_point(image, Corner::BottomRight, &right_edge, &bottom_edge)?,
    };

    debug!("wide bar ends {:?}, codeword area {:?}", wide_bars, codeword_area);
    Ok(VertexSet {
        guards: *guards,
        wide_bars,
        codeword_area,
    })
}
