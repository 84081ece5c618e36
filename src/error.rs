//! Detection failures. Every variant is terminal for the call that produced it.

use crate::models::{Corner, Side};

/// Why a detection attempt was abandoned
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    /// Neither the upright nor the 180 degree vertex search completed
    #[error("no PDF417 start/stop guard patterns found in either orientation")]
    NoSymbolFound,
    /// The guard pattern scans on one side landed on nearly the same row
    #[error(
        "cannot find enough PDF417 guard patterns: {side} side spans {separation:.1} px, need {required:.1} px"
    )]
    InsufficientGuardSeparation {
        /// Side whose inner corners are too close
        side: Side,
        /// Vertical distance between the two inner corners
        separation: f32,
        /// Configured minimum
        required: f32,
    },
    /// The two lines defining a codeword area corner do not cross
    #[error("cannot find the crossing of parallel lines for the {corner} corner")]
    ParallelLinesNoCrossing {
        /// Corner being corrected
        corner: Corner,
    },
    /// A corrected codeword area corner falls outside the source image
    #[error("crossing point ({x:.1}, {y:.1}) for the {corner} corner is outside the {width}x{height} image")]
    CrossingOutOfBounds {
        /// Corner being corrected
        corner: Corner,
        /// Computed x
        x: f32,
        /// Computed y
        y: f32,
        /// Image width
        width: usize,
        /// Image height
        height: usize,
    },
    /// Module width estimate below one pixel
    #[error("bad module width {module_width:.3} px")]
    ModuleWidthTooSmall {
        /// Estimated module width
        module_width: f32,
    },
    /// Row dimension estimate below one module
    #[error("bad dimension {dimension}")]
    InvalidDimension {
        /// Computed modules per row
        dimension: i32,
    },
    /// The corrected corners do not define a projective mapping
    #[error("degenerate perspective transform for the codeword area")]
    DegenerateTransform,
    /// Sampling needed a source pixel outside the image
    #[error("grid cell ({column}, {row}) maps to ({x:.1}, {y:.1}), outside the source image")]
    SampleOutOfBounds {
        /// Destination column
        column: usize,
        /// Destination row
        row: usize,
        /// Source x
        x: f32,
        /// Source y
        y: f32,
    },
}

/// Result type used across the detector
pub type Result<T, E = DetectError> = std::result::Result<T, E>;
