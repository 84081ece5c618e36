/// Module width and grid size estimation from the corrected geometry
use log::debug;

use crate::error::{DetectError, Result};
use crate::models::{Corners, GuardVertices};
use crate::utils::geometry::round_half_up;

/// Modules in a start pattern or a codeword
pub const MODULES_PER_CODEWORD: i32 = 17;
/// Modules in a stop pattern
pub const STOP_PATTERN_MODULES: i32 = 18;

/// Average module width in pixels, measured across both guard patterns
pub fn compute_module_width(guards: &GuardVertices) -> Result<f32> {
    let (outer, inner) = (&guards.barcode, &guards.codeword);
    let start = (outer.top_left.distance(&inner.top_left)
        + outer.bottom_left.distance(&inner.bottom_left))
        / (2 * MODULES_PER_CODEWORD) as f32;
    let stop = (inner.top_right.distance(&outer.top_right)
        + inner.bottom_right.distance(&outer.bottom_right))
        / (2 * STOP_PATTERN_MODULES) as f32;
    let module_width = (start + stop) / 2.0;

    // NaN fails this check as well
    if !(module_width >= 1.0) {
        debug!("module width {:.3} px rejected", module_width);
        return Err(DetectError::ModuleWidthTooSmall { module_width });
    }
    Ok(module_width)
}

/// Modules per row of the codeword area, snapped to a whole codeword count
pub fn compute_dimension(area: &Corners, module_width: f32) -> Result<usize> {
    let top = round_half_up(area.top_left.distance(&area.top_right) / module_width);
    let bottom = round_half_up(area.bottom_left.distance(&area.bottom_right) / module_width);
    let dimension = (((top + bottom) >> 1) + 8) / MODULES_PER_CODEWORD * MODULES_PER_CODEWORD;
    if dimension < 1 {
        debug!("row dimension {} rejected ({} / {} modules)", dimension, top, bottom);
        return Err(DetectError::InvalidDimension { dimension });
    }
    Ok(dimension as usize)
}

/// Module rows covered by the codeword area. Not snapped; callers usually
/// raise it to at least the row dimension.
pub fn compute_y_dimension(area: &Corners, module_width: f32) -> usize {
    let left = round_half_up(area.top_left.distance(&area.bottom_left) / module_width);
    let right = round_half_up(area.top_right.distance(&area.bottom_right) / module_width);
    ((left + right) >> 1).max(0) as usize
}
