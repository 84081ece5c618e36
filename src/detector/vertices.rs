/// Locate the outer and codeword-area corners of a symbol (vertices 0-7)
///
/// Four row scans run one after the other, each only when the previous one
/// found its guard pattern: top-left, bottom-left, top-right, bottom-right.
/// A symbol missing any of its four guard sightings yields nothing at all.
use log::{debug, trace};

use super::guard::{GuardPattern, find_guard_pattern};
use crate::config::DetectOptions;
use crate::models::{BinaryImage, Corners, GuardVertices, Orientation, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowOrder {
    TopDown,
    BottomUp,
}

/// Rows to visit: every `step`-th row from the top starting at 0, or from the
/// bottom starting at `height - 1` and stopping before row 0
fn rows(height: usize, step: usize, order: RowOrder) -> Box<dyn Iterator<Item = usize>> {
    match order {
        RowOrder::TopDown => Box::new((0..height).step_by(step)),
        RowOrder::BottomUp => Box::new((1..height).rev().step_by(step)),
    }
}

/// One guard sighting: scan row and the matched column span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sighting {
    row: usize,
    start: usize,
    end: usize,
}

impl Sighting {
    fn start_point(&self) -> Point {
        Point::new(self.start as f32, self.row as f32)
    }

    fn end_point(&self) -> Point {
        Point::new(self.end as f32, self.row as f32)
    }
}

fn scan_rows<I: BinaryImage + ?Sized>(
    image: &I,
    pattern: GuardPattern,
    column: usize,
    width: usize,
    order: RowOrder,
    step: usize,
    counters: &mut Vec<u32>,
) -> Option<Sighting> {
    let white_first = pattern.white_first();
    let found = rows(image.height(), step, order).find_map(|row| {
        find_guard_pattern(image, column, row, width, white_first, pattern.runs(), counters)
            .map(|(start, end)| Sighting { row, start, end })
    });
    if let Some(s) = found {
        trace!(
            "{} pattern ({:?}) at row {} columns {}..{}",
            pattern, order, s.row, s.start, s.end
        );
    }
    found
}

/// Find vertices 0-7 of an upright symbol
pub fn find_vertices<I: BinaryImage + ?Sized>(image: &I, row_step: usize) -> Option<GuardVertices> {
    let width = image.width();
    let step = row_step.max(1);
    let mut counters = Vec::with_capacity(GuardPattern::Stop.runs().len());
    let mut scan = |pattern, order| scan_rows(image, pattern, 0, width, order, step, &mut counters);

    let top_left = scan(GuardPattern::Start, RowOrder::TopDown)?;
    let bottom_left = scan(GuardPattern::Start, RowOrder::BottomUp)?;
    let top_right = scan(GuardPattern::Stop, RowOrder::TopDown)?;
    let bottom_right = scan(GuardPattern::Stop, RowOrder::BottomUp)?;

    Some(GuardVertices {
        barcode: Corners {
            top_left: top_left.start_point(),
            bottom_left: bottom_left.start_point(),
            top_right: top_right.end_point(),
            bottom_right: bottom_right.end_point(),
        },
        codeword: Corners {
            top_left: top_left.end_point(),
            bottom_left: bottom_left.end_point(),
            top_right: top_right.start_point(),
            bottom_right: bottom_right.start_point(),
        },
    })
}

/// Find vertices 0-7 of a symbol turned by 180 degrees.
///
/// Corners are named in the symbol's own frame (its top-left sits near the
/// bottom-right of the image) and expressed in image coordinates.
pub fn find_vertices_180<I: BinaryImage + ?Sized>(image: &I, row_step: usize) -> Option<GuardVertices> {
    let half_width = image.width() >> 1;
    let step = row_step.max(1);
    let mut counters = Vec::with_capacity(GuardPattern::StopReversed.runs().len());

    // Start patterns sit in the right half, stop patterns in the left half
    let mut scan = |pattern: GuardPattern, order| {
        let column = if pattern == GuardPattern::StartReversed { half_width } else { 0 };
        scan_rows(image, pattern, column, half_width, order, step, &mut counters)
    };

    let top_left = scan(GuardPattern::StartReversed, RowOrder::BottomUp)?;
    let bottom_left = scan(GuardPattern::StartReversed, RowOrder::TopDown)?;
    let top_right = scan(GuardPattern::StopReversed, RowOrder::BottomUp)?;
    let bottom_right = scan(GuardPattern::StopReversed, RowOrder::TopDown)?;

    Some(GuardVertices {
        barcode: Corners {
            top_left: top_left.end_point(),
            bottom_left: bottom_left.end_point(),
            top_right: top_right.start_point(),
            bottom_right: bottom_right.start_point(),
        },
        codeword: Corners {
            top_left: top_left.start_point(),
            bottom_left: bottom_left.start_point(),
            top_right: top_right.end_point(),
            bottom_right: bottom_right.end_point(),
        },
    })
}

/// Try the upright search, then (if enabled) the 180 degree one
pub fn locate_vertices<I: BinaryImage + ?Sized>(
    image: &I,
    options: &DetectOptions,
) -> Option<(GuardVertices, Orientation)> {
    let step = options.effective_row_step();
    if let Some(v) = find_vertices(image, step) {
        debug!("guard patterns found upright: {:?}", v);
        return Some((v, Orientation::Normal));
    }
    if !options.try_rotated {
        return None;
    }
    let found = find_vertices_180(image, step).map(|v| (v, Orientation::Rotated180));
    match &found {
        Some((v, _)) => debug!("guard patterns found upside down: {:?}", v),
        None => debug!("no guard patterns in {}x{} image", image.width(), image.height()),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BitMatrix;
    use crate::tools::synthetic::{SymbolSpec, render, rotate_180};

    #[test]
    fn test_row_orders() {
        let down: Vec<usize> = rows(20, 8, RowOrder::TopDown).collect();
        assert_eq!(down, vec![0, 8, 16]);
        let up: Vec<usize> = rows(20, 8, RowOrder::BottomUp).collect();
        assert_eq!(up, vec![19, 11, 3]);
        assert_eq!(rows(1, 8, RowOrder::BottomUp).count(), 0);
        assert_eq!(rows(0, 8, RowOrder::TopDown).count(), 0);
    }

    #[test]
    fn test_find_vertices_upright() {
        let spec = SymbolSpec::default();
        let image = render(&spec);
        let v = find_vertices(&image, 8).expect("vertices");

        let m = spec.module_px as f32;
        let outer_left = (spec.quiet_zone * spec.module_px) as f32;
        let (cw_left, cw_right) = spec.codeword_area_columns();

        assert_eq!(v.barcode.top_left.x, outer_left);
        assert_eq!(v.codeword.top_left.x, cw_left as f32);
        assert_eq!(v.codeword.top_right.x, cw_right as f32);
        assert_eq!(v.barcode.top_right.x, cw_right as f32 + 18.0 * m);
        assert_eq!(v.barcode.bottom_left.x, outer_left);

        let (top, bottom) = spec.symbol_rows();
        for p in [v.barcode.top_left, v.barcode.top_right] {
            assert!(p.y >= top as f32 && p.y < top as f32 + 8.0, "{:?}", p);
        }
        for p in [v.barcode.bottom_left, v.barcode.bottom_right] {
            assert!(p.y <= bottom as f32 && p.y > bottom as f32 - 8.0, "{:?}", p);
        }
        assert_eq!(v.barcode.top_left.y, v.codeword.top_left.y);
        assert_eq!(v.barcode.bottom_right.y, v.codeword.bottom_right.y);
    }

    #[test]
    fn test_upright_search_misses_rotated_symbol() {
        let image = rotate_180(&render(&SymbolSpec::default()));
        assert!(find_vertices(&image, 8).is_none());
    }

    #[test]
    fn test_find_vertices_180() {
        let spec = SymbolSpec::default();
        let upright = find_vertices(&render(&spec), 8).expect("upright");
        let image = rotate_180(&render(&spec));
        let v = find_vertices_180(&image, 8).expect("rotated");

        let w = image.width() as f32;
        // Column boundaries map through x -> w - x
        assert_eq!(v.codeword.top_left.x, w - upright.codeword.top_left.x);
        assert_eq!(v.barcode.top_left.x, w - upright.barcode.top_left.x);
        assert_eq!(v.codeword.top_right.x, w - upright.codeword.top_right.x);
        assert_eq!(v.barcode.bottom_right.x, w - upright.barcode.bottom_right.x);
        // Symbol top is near the bottom of the image
        assert!(v.barcode.top_left.y > v.barcode.bottom_left.y);
        assert!(v.codeword.top_right.y > v.codeword.bottom_right.y);
    }

    #[test]
    fn test_partial_symbol_yields_nothing() {
        // Start patterns only: the stop scans fail, so nothing is reported
        let spec = SymbolSpec::default();
        let full = render(&spec);
        let (_, cw_right) = spec.codeword_area_columns();
        let mut cut = BitMatrix::new(full.width(), full.height());
        for y in 0..full.height() {
            for x in 0..cw_right {
                if full.get(x, y) {
                    cut.set(x, y, true);
                }
            }
        }
        assert!(find_vertices(&cut, 8).is_none());
    }

    #[test]
    fn test_locate_prefers_upright_and_respects_options() {
        let spec = SymbolSpec::default();
        let upright = render(&spec);
        let (_, orientation) = locate_vertices(&upright, &DetectOptions::default()).unwrap();
        assert_eq!(orientation, Orientation::Normal);

        let rotated = rotate_180(&upright);
        let (_, orientation) = locate_vertices(&rotated, &DetectOptions::default()).unwrap();
        assert_eq!(orientation, Orientation::Rotated180);

        let no_rotation = DetectOptions::default().with_try_rotated(false);
        assert!(locate_vertices(&rotated, &no_rotation).is_none());
    }

    #[test]
    fn test_blank_image() {
        for (w, h) in [(0, 0), (1, 1), (64, 48), (300, 200)] {
            let image = BitMatrix::new(w, h);
            assert!(locate_vertices(&image, &DetectOptions::default()).is_none());
        }
    }
}
