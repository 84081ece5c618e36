//! RustPDF417 - PDF417 symbol detection in pure Rust
//!
//! Finds a PDF417 symbol in an already binarized image and rectifies it into
//! an oversampled bit grid for a codeword decoder:
//!
//! ```
//! use rust_pdf417::tools::synthetic::{SymbolSpec, render};
//!
//! let image = render(&SymbolSpec::default());
//! let result = rust_pdf417::detect(&image).unwrap();
//! assert_eq!(result.dimension % 17, 0);
//! ```
//!
//! Thresholding and decoding are left to the caller.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection options and environment overrides
pub mod config;
/// PDF417 detection stages (guard patterns, vertices, sampling)
pub mod detector;
/// Detection failures
pub mod error;
/// Core data structures (BitMatrix, Point, vertex sets, results)
pub mod models;
mod pipeline;
/// Image file helpers and synthetic symbols
pub mod tools;
/// Geometry helpers (perspective transform, line intersection)
pub mod utils;

pub use config::DetectOptions;
pub use error::{DetectError, Result};
pub use models::{BinaryImage, BitMatrix, DetectorResult, Orientation, Point, VertexSet};

use rayon::prelude::*;

/// Detect a PDF417 symbol with default options
///
/// # Arguments
/// * `image` - Binary image, black pixels being bars
///
/// # Returns
/// The rectified bit grid and geometry, or the reason detection stopped
pub fn detect<I: BinaryImage + ?Sized>(image: &I) -> Result<DetectorResult> {
    pipeline::run(image, &DetectOptions::default())
}

/// Detect a PDF417 symbol with explicit options
pub fn detect_with_options<I: BinaryImage + ?Sized>(
    image: &I,
    options: &DetectOptions,
) -> Result<DetectorResult> {
    pipeline::run(image, options)
}

/// Detect one symbol per image in parallel. Results keep the input order.
pub fn detect_batch<I: BinaryImage + Sync>(
    images: &[I],
    options: &DetectOptions,
) -> Vec<Result<DetectorResult>> {
    images
        .par_iter()
        .map(|image| pipeline::run(image, options))
        .collect()
}

/// Detector holding a set of options
#[derive(Debug, Clone, Default)]
pub struct Detector {
    options: DetectOptions,
}

impl Detector {
    /// Create a detector with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with the given options
    pub fn with_options(options: DetectOptions) -> Self {
        Self { options }
    }

    /// Create a detector configured from `PDF417_*` environment variables
    pub fn from_env() -> Self {
        Self::with_options(DetectOptions::from_env())
    }

    /// Options in use
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Detect a symbol in one image
    pub fn detect<I: BinaryImage + ?Sized>(&self, image: &I) -> Result<DetectorResult> {
        pipeline::run(image, &self.options)
    }

    /// Detect symbols in several images in parallel
    pub fn detect_batch<I: BinaryImage + Sync>(&self, images: &[I]) -> Vec<Result<DetectorResult>> {
        detect_batch(images, &self.options)
    }
}
