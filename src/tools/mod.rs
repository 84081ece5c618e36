//! Helpers for tests, benchmarks and callers working with image files.

pub mod synthetic;

use crate::models::BitMatrix;
use std::path::Path;

/// Load an already binarized image file (dark pixels are black).
///
/// The luma channel is split at the midpoint; no adaptive thresholding is
/// done, so grayscale photographs should be binarized before they get here.
pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<BitMatrix, image::ImageError> {
    let gray = image::open(path)?.to_luma8();
    Ok(BitMatrix::from_image(&gray))
}

/// Write a bit matrix as a black and white image file.
pub fn save_binary<P: AsRef<Path>>(matrix: &BitMatrix, path: P) -> Result<(), image::ImageError> {
    matrix.to_gray_image().save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::synthetic::{SymbolSpec, render};

    #[test]
    fn test_png_roundtrip() {
        let image = render(&SymbolSpec::default());
        let path = std::env::temp_dir().join(format!("rust_pdf417_roundtrip_{}.png", std::process::id()));
        save_binary(&image, &path).expect("save");
        let loaded = load_binary(&path).expect("load");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_binary("does/not/exist.png").is_err());
    }
}
