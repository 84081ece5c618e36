//! PDF417 detection stages
//!
//! Each stage refines the geometry produced by the previous one:
//! - Guard pattern matching (start/stop patterns on a single row)
//! - Vertex location (four guard sightings, upright or upside down)
//! - Vertex correction (wide bar tracing and corner intersection)
//! - Dimension estimation (module width and grid size)
//! - Sampling (perspective correction onto a regular grid)

/// Vertex correction using the wide guard bars
pub mod correct;
/// Module width and row/column dimension estimation
pub mod dimension;
/// Start and stop pattern matching with fixed-point variance scoring
pub mod guard;
/// Perspective re-sampling of the codeword area
pub mod sampler;
/// Four-step guard pattern search for vertices 0-7
pub mod vertices;
