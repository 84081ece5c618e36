use log::debug;

use crate::config::DetectOptions;
use crate::detector::correct::correct_vertices;
use crate::detector::dimension::{compute_dimension, compute_module_width, compute_y_dimension};
use crate::detector::sampler::sample_lines;
use crate::detector::vertices::locate_vertices;
use crate::error::{DetectError, Result};
use crate::models::{BinaryImage, DetectorResult};

/// Run every stage on one image. The first failing stage ends the attempt.
pub(crate) fn run<I: BinaryImage + ?Sized>(image: &I, options: &DetectOptions) -> Result<DetectorResult> {
    let (guards, orientation) =
        locate_vertices(image, options).ok_or(DetectError::NoSymbolFound)?;

    let vertices = correct_vertices(image, &guards, orientation, options)
        .inspect_err(|e| debug!("vertex correction failed: {}", e))?;

    let module_width = compute_module_width(&guards)?;
    let area = &vertices.codeword_area;
    let dimension = compute_dimension(area, module_width)?;
    let y_dimension = compute_y_dimension(area, module_width).max(dimension);
    debug!(
        "{:?} symbol: module width {:.2} px, {} modules per row, {} module rows",
        orientation, module_width, dimension, y_dimension
    );

    let bits = sample_lines(image, area, dimension, y_dimension)
        .inspect_err(|e| debug!("sampling failed: {}", e))?;
    let points = DetectorResult::grid_corners(bits.width(), bits.height());

    Ok(DetectorResult {
        bits,
        points,
        orientation,
        module_width,
        dimension,
        y_dimension,
        vertices,
    })
}
