//! Deterministic PDF417-shaped test symbols.
//!
//! Each symbol row is a start pattern, a left row indicator, the data
//! codewords, a right row indicator and a stop pattern. Codewords are drawn
//! from a small fixed set of 17-module bar/space patterns, so the output is
//! not decodable, but every guard and module boundary sits where a real
//! symbol would put it.

use crate::models::BitMatrix;

/// Modules in the start pattern and in every codeword
pub const CODEWORD_MODULES: usize = 17;
/// Modules in the stop pattern
pub const STOP_MODULES: usize = 18;

const START_RUNS: [usize; 8] = [8, 1, 1, 1, 1, 1, 1, 3];
const STOP_RUNS: [usize; 9] = [7, 1, 1, 3, 1, 1, 1, 2, 1];

// Four bars and four spaces, 17 modules, no run wider than 3 modules
const CODEWORDS: [[usize; 8]; 4] = [
    [2, 2, 2, 2, 2, 2, 2, 3],
    [3, 1, 2, 3, 1, 2, 3, 2],
    [1, 3, 3, 1, 2, 2, 3, 2],
    [3, 3, 1, 1, 3, 2, 1, 3],
];

/// Layout of a synthetic symbol
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSpec {
    /// Data codewords per row, row indicators excluded
    pub data_columns: usize,
    /// Symbol rows
    pub rows: usize,
    /// Pixels per module
    pub module_px: usize,
    /// Height of one symbol row in modules
    pub row_height: usize,
    /// White border around the symbol in modules
    pub quiet_zone: usize,
    /// Horizontal shift in pixels per pixel row, used to shear the symbol
    pub shear: f32,
}

impl Default for SymbolSpec {
    fn default() -> Self {
        Self {
            data_columns: 2,
            rows: 12,
            module_px: 2,
            row_height: 3,
            quiet_zone: 4,
            shear: 0.0,
        }
    }
}

impl SymbolSpec {
    /// Codewords per row including both row indicators
    pub fn codeword_columns(&self) -> usize {
        self.data_columns + 2
    }

    /// Symbol width in modules
    pub fn modules_wide(&self) -> usize {
        CODEWORD_MODULES + CODEWORD_MODULES * self.codeword_columns() + STOP_MODULES
    }

    /// Symbol height in modules
    pub fn modules_high(&self) -> usize {
        self.rows * self.row_height
    }

    /// Extra columns added so a sheared symbol stays inside the image
    fn shear_margin(&self) -> usize {
        let height = (self.modules_high() + 2 * self.quiet_zone) * self.module_px;
        (self.shear.abs() * height as f32).ceil() as usize
    }

    /// Rendered image size in pixels
    pub fn image_size(&self) -> (usize, usize) {
        let m = self.module_px;
        (
            (self.modules_wide() + 2 * self.quiet_zone) * m + self.shear_margin(),
            (self.modules_high() + 2 * self.quiet_zone) * m,
        )
    }

    /// Left column of the codeword area and the first column of the stop
    /// pattern, for an unsheared symbol
    pub fn codeword_area_columns(&self) -> (usize, usize) {
        let m = self.module_px;
        let left = (self.quiet_zone + CODEWORD_MODULES) * m;
        (left, left + CODEWORD_MODULES * self.codeword_columns() * m)
    }

    /// First and last pixel row covered by the symbol
    pub fn symbol_rows(&self) -> (usize, usize) {
        let m = self.module_px;
        let top = self.quiet_zone * m;
        (top, top + self.modules_high() * m - 1)
    }

    fn row_shift(&self, y: usize) -> isize {
        let base = if self.shear < 0.0 { self.shear_margin() as f32 } else { 0.0 };
        (base + self.shear * y as f32).round() as isize
    }
}

/// Module colors of one symbol row, left to right (true = black)
pub fn row_modules(spec: &SymbolSpec, row: usize) -> Vec<bool> {
    let mut out = Vec::with_capacity(spec.modules_wide());
    push_runs(&mut out, &START_RUNS);
    push_runs(&mut out, &CODEWORDS[row % CODEWORDS.len()]);
    for column in 0..spec.data_columns {
        let pick = (row * 7 + column * 3 + 1) % CODEWORDS.len();
        push_runs(&mut out, &CODEWORDS[pick]);
    }
    push_runs(&mut out, &CODEWORDS[(row + 2) % CODEWORDS.len()]);
    push_runs(&mut out, &STOP_RUNS);
    out
}

fn push_runs(out: &mut Vec<bool>, runs: &[usize]) {
    let mut black = true;
    for &run in runs {
        out.extend(std::iter::repeat_n(black, run));
        black = !black;
    }
}

/// Render a symbol centred in its quiet zone
pub fn render(spec: &SymbolSpec) -> BitMatrix {
    let (width, height) = spec.image_size();
    let mut image = BitMatrix::new(width, height);
    let m = spec.module_px;
    let left = spec.quiet_zone * m;

    for module_row in 0..spec.modules_high() {
        let modules = row_modules(spec, module_row / spec.row_height);
        for py in 0..m {
            let y = (spec.quiet_zone + module_row) * m + py;
            let shift = spec.row_shift(y);
            for (i, _) in modules.iter().enumerate().filter(|(_, black)| **black) {
                let x = left as isize + shift + (i * m) as isize;
                if x >= 0 {
                    image.fill_rect(x as usize, y, m, 1);
                }
            }
        }
    }
    image
}

/// Turn an image upside down
pub fn rotate_180(image: &BitMatrix) -> BitMatrix {
    let (w, h) = (image.width(), image.height());
    let mut out = BitMatrix::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if image.get(x, y) {
                out.set(w - 1 - x, h - 1 - y, true);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codewords_are_17_modules() {
        for cw in CODEWORDS.iter() {
            assert_eq!(cw.iter().sum::<usize>(), CODEWORD_MODULES);
        }
        assert_eq!(START_RUNS.iter().sum::<usize>(), CODEWORD_MODULES);
        assert_eq!(STOP_RUNS.iter().sum::<usize>(), STOP_MODULES);
    }

    #[test]
    fn test_row_layout() {
        let spec = SymbolSpec::default();
        let row = row_modules(&spec, 0);
        assert_eq!(row.len(), spec.modules_wide());
        assert!(row[..8].iter().all(|&b| b));
        assert!(!row[8]);
        assert!(*row.last().unwrap());
    }

    #[test]
    fn test_render_geometry() {
        let spec = SymbolSpec::default();
        let image = render(&spec);
        let (w, h) = spec.image_size();
        assert_eq!((image.width(), image.height()), (w, h));

        let (top, bottom) = spec.symbol_rows();
        let outer_left = spec.quiet_zone * spec.module_px;
        assert!(!image.get(outer_left, top - 1));
        assert!(image.get(outer_left, top));
        assert!(image.get(outer_left, bottom));
        assert!(!image.get(outer_left, bottom + 1));
        assert!(!image.get(outer_left - 1, top));
    }

    #[test]
    fn test_rotate_180_roundtrip() {
        let image = render(&SymbolSpec::default());
        assert_eq!(rotate_180(&rotate_180(&image)), image);
        let rotated = rotate_180(&image);
        assert_eq!(rotated.get(0, 0), image.get(image.width() - 1, image.height() - 1));
    }

    #[test]
    fn test_shear_keeps_symbol_inside() {
        let spec = SymbolSpec {
            shear: -0.3,
            ..SymbolSpec::default()
        };
        let image = render(&spec);
        let expected: usize = row_modules(&spec, 0).iter().filter(|b| **b).count()
            * spec.module_px
            * spec.module_px
            * spec.row_height;
        let first_row_black: usize = (0..spec.module_px * spec.row_height)
            .map(|dy| {
                let y = spec.symbol_rows().0 + dy;
                (0..image.width()).filter(|&x| image.get(x, y)).count()
            })
            .sum();
        assert_eq!(first_row_black, expected);
    }
}
