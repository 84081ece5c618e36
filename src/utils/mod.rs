//! Utility functions for symbol detection
//!
//! - Geometry (perspective transforms, line intersection, rounding)

/// Perspective transform, line intersection and rounding
pub mod geometry;
