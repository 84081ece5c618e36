//! Detector options.
//!
//! Every field has a default that works on typical scans. The same values can
//! be overridden process-wide through environment variables, read once:
//!
//! | variable | field |
//! |----------|-------|
//! | `PDF417_ROW_STEP` | [`DetectOptions::row_step`] |
//! | `PDF417_TRY_ROTATED` | [`DetectOptions::try_rotated`] (0 or 1) |
//! | `PDF417_MIN_GUARD_SEPARATION` | [`DetectOptions::min_guard_separation`] |
//! | `PDF417_SKEW_TOLERANCE` | [`DetectOptions::skew_tolerance`] |

use std::sync::OnceLock;

/// Default distance between scanned rows
pub const DEFAULT_ROW_STEP: usize = 8;
/// Default minimum vertical span of a guard pattern, in pixels
pub const DEFAULT_MIN_GUARD_SEPARATION: f32 = 20.0;
/// Default sideways search when following a skewed wide bar, in pixels per row
pub const DEFAULT_SKEW_TOLERANCE: usize = 1;

/// Tunables threaded through every detection stage
#[derive(Debug, Clone, PartialEq)]
pub struct DetectOptions {
    /// Scan every n-th row while looking for guard patterns. Larger is faster
    /// but places the preliminary corners further from the true ones.
    pub row_step: usize,
    /// Search for an upside-down symbol when the upright search fails
    pub try_rotated: bool,
    /// Inner corners of one guard pattern closer than this (vertically) are
    /// rejected
    pub min_guard_separation: f32,
    /// How far sideways a wide bar may drift between two rows while its top
    /// and bottom are traced
    pub skew_tolerance: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            row_step: DEFAULT_ROW_STEP,
            try_rotated: true,
            min_guard_separation: DEFAULT_MIN_GUARD_SEPARATION,
            skew_tolerance: DEFAULT_SKEW_TOLERANCE,
        }
    }
}

impl DetectOptions {
    /// Defaults with any `PDF417_*` environment overrides applied
    pub fn from_env() -> Self {
        ENV_OPTIONS.get_or_init(Self::read_env).clone()
    }

    /// Set the row step (clamped to at least 1)
    pub fn with_row_step(mut self, row_step: usize) -> Self {
        self.row_step = row_step.max(1);
        self
    }

    /// Enable or disable the 180 degree search
    pub fn with_try_rotated(mut self, try_rotated: bool) -> Self {
        self.try_rotated = try_rotated;
        self
    }

    /// Set the minimum guard separation in pixels
    pub fn with_min_guard_separation(mut self, separation: f32) -> Self {
        self.min_guard_separation = separation;
        self
    }

    /// Set the sideways skew tolerance in pixels per row
    pub fn with_skew_tolerance(mut self, tolerance: usize) -> Self {
        self.skew_tolerance = tolerance;
        self
    }

    /// Row step actually used for scanning
    pub(crate) fn effective_row_step(&self) -> usize {
        self.row_step.max(1)
    }

    fn read_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any name-to-value source; unparsable values keep
    /// the default
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            row_step: parse_usize(get("PDF417_ROW_STEP"), defaults.row_step).clamp(1, 64),
            try_rotated: parse_bool_u8(get("PDF417_TRY_ROTATED"), defaults.try_rotated),
            min_guard_separation: parse_f32(
                get("PDF417_MIN_GUARD_SEPARATION"),
                defaults.min_guard_separation,
            )
            .max(0.0),
            skew_tolerance: parse_usize(get("PDF417_SKEW_TOLERANCE"), defaults.skew_tolerance)
                .min(8),
        }
    }
}

static ENV_OPTIONS: OnceLock<DetectOptions> = OnceLock::new();

fn parse_usize(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_f32(value: Option<String>, default: f32) -> f32 {
    value
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_bool_u8(value: Option<String>, default: bool) -> bool {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}
