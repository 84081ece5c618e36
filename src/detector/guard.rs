/// Start/stop guard pattern matching on a single image row
///
/// Runs of equal color are counted into a sliding window as long as the
/// pattern; every time the window fills it is scored against the expected
/// bar/space widths with 8-bit fixed-point arithmetic.
use std::fmt;

use crate::models::BinaryImage;

/// Largest accepted average variance: 0.42 of a module, scaled by 256.
///
/// The two variance caps were validated against reference scans at this
/// exact 8-bit scale; changing the representation needs re-validation.
pub const MAX_AVG_VARIANCE: u32 = 107;

/// Largest accepted variance of any single run: 0.8 of a module, scaled by 256
pub const MAX_INDIVIDUAL_VARIANCE: u32 = 204;

/// The four guard patterns of a PDF417 symbol, as seen left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardPattern {
    /// Start pattern, 17 modules: 11111111 0 1 0 1 0 1 000
    Start,
    /// Start pattern of an upside-down symbol
    StartReversed,
    /// Stop pattern, 18 modules: 1111111 0 1 000 1 0 1 00 1
    Stop,
    /// Stop pattern of an upside-down symbol
    StopReversed,
}

const START_RUNS: [u32; 8] = [8, 1, 1, 1, 1, 1, 1, 3];
const START_REVERSED_RUNS: [u32; 8] = [3, 1, 1, 1, 1, 1, 1, 8];
const STOP_RUNS: [u32; 9] = [7, 1, 1, 3, 1, 1, 1, 2, 1];
const STOP_REVERSED_RUNS: [u32; 9] = [1, 2, 1, 1, 1, 3, 1, 1, 7];

impl GuardPattern {
    /// Expected run widths in modules, alternating colors
    pub fn runs(self) -> &'static [u32] {
        match self {
            GuardPattern::Start => &START_RUNS,
            GuardPattern::StartReversed => &START_REVERSED_RUNS,
            GuardPattern::Stop => &STOP_RUNS,
            GuardPattern::StopReversed => &STOP_REVERSED_RUNS,
        }
    }

    /// Total width in modules
    pub fn modules(self) -> u32 {
        self.runs().iter().sum()
    }

    /// Whether the first run of the pattern is a space
    pub fn white_first(self) -> bool {
        matches!(self, GuardPattern::StartReversed)
    }
}

impl fmt::Display for GuardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuardPattern::Start => "start",
            GuardPattern::StartReversed => "start-reversed",
            GuardPattern::Stop => "stop",
            GuardPattern::StopReversed => "stop-reversed",
        };
        f.write_str(name)
    }
}

/// Search one row for a guard pattern.
///
/// Scans `width` pixels of `row` starting at `column`. The first run counted
/// is white when `white_first` is set, black otherwise. `counters` is scratch
/// space owned by the caller and reused across calls.
///
/// Returns the start column of the matched window and the column of the
/// first pixel after it.
pub fn find_guard_pattern<I: BinaryImage + ?Sized>(
    image: &I,
    column: usize,
    row: usize,
    width: usize,
    white_first: bool,
    pattern: &[u32],
    counters: &mut Vec<u32>,
) -> Option<(usize, usize)> {
    let pattern_length = pattern.len();
    if pattern_length < 2 || row >= image.height() {
        return None;
    }
    counters.clear();
    counters.resize(pattern_length, 0);

    let end = column.saturating_add(width).min(image.width());
    let mut is_white = white_first;
    let mut counter_position = 0usize;
    let mut pattern_start = column;

    for x in column..end {
        let pixel = image.is_black(x, row);
        if pixel != is_white {
            counters[counter_position] += 1;
            continue;
        }

        if counter_position == pattern_length - 1 {
            if pattern_match_variance(counters, pattern, MAX_INDIVIDUAL_VARIANCE)
                < MAX_AVG_VARIANCE
            {
                return Some((pattern_start, x));
            }
            // Drop the oldest bar/space pair and keep scanning
            pattern_start += (counters[0] + counters[1]) as usize;
            counters.copy_within(2.., 0);
            counters[pattern_length - 2] = 0;
            counters[pattern_length - 1] = 0;
            counter_position -= 1;
        } else {
            counter_position += 1;
        }
        counters[counter_position] = 1;
        is_white = !is_white;
    }

    None
}

/// Score how closely observed run widths match an expected pattern.
///
/// Returns the total variance divided by the total observed width, scaled by
/// 256: 0 is a perfect match, and `u32::MAX` means a single run was off by
/// more than `max_individual_variance` or the window is narrower than one
/// pixel per module.
pub fn pattern_match_variance(counters: &[u32], pattern: &[u32], max_individual_variance: u32) -> u32 {
    let total: u64 = counters.iter().map(|&c| c as u64).sum();
    let pattern_length: u64 = pattern.iter().map(|&p| p as u64).sum();
    if total == 0 || total < pattern_length {
        return u32::MAX;
    }

    let unit_bar_width = (total << 8) / pattern_length;
    let max_individual_variance = (max_individual_variance as u64 * unit_bar_width) >> 8;

    let mut total_variance = 0u64;
    for (&counter, &expected) in counters.iter().zip(pattern) {
        let counter = (counter as u64) << 8;
        let scaled_pattern = expected as u64 * unit_bar_width;
        let variance = counter.abs_diff(scaled_pattern);
        if variance > max_individual_variance {
            return u32::MAX;
        }
        total_variance += variance;
    }

    (total_variance / total).min(u32::MAX as u64) as u32
}
