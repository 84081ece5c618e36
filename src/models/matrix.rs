/// Read-only black/white pixel source the detector scans.
///
/// Implementations must not change while a detection call is running. The
/// detector only asks for coordinates inside `width() x height()`.
pub trait BinaryImage {
    /// Image width in pixels
    fn width(&self) -> usize;
    /// Image height in pixels
    fn height(&self) -> usize;
    /// Whether the pixel at (x, y) is black
    fn is_black(&self, x: usize, y: usize) -> bool;
}

impl<T: BinaryImage + ?Sized> BinaryImage for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        (**self).is_black(x, y)
    }
}

/// Luma below this value counts as black when a grayscale buffer is used
/// directly as a binary image.
pub const LUMA_BLACK_BELOW: u8 = 128;

/// A `GrayImage` holding an already binarized picture. No thresholding is
/// attempted beyond splitting luma at the midpoint.
impl BinaryImage for image::GrayImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        self.get_pixel(x as u32, y as u32).0[0] < LUMA_BLACK_BELOW
    }
}

/// Compact bit matrix for storing binary data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-white bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Copy any binary image into a bit matrix
    pub fn from_image<I: BinaryImage + ?Sized>(image: &I) -> Self {
        let mut matrix = Self::new(image.width(), image.height());
        for y in 0..matrix.height {
            for x in 0..matrix.width {
                if image.is_black(x, y) {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out of range reads as white
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Set every bit in the half-open rectangle to black
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for yy in y..y_end {
            for xx in x..x_end {
                self.set(xx, yy, true);
            }
        }
    }

    /// Number of black bits
    pub fn count_black(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Render as an 8-bit luma image (black = 0, white = 255)
    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.get(x as usize, y as usize) {
                image::Luma([0u8])
            } else {
                image::Luma([255u8])
            }
        })
    }
}

impl BinaryImage for BitMatrix {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_black(&self, x: usize, y: usize) -> bool {
        self.get(x, y)
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut matrix = BitMatrix::new(10, 4);
        matrix.fill_rect(8, 2, 5, 5);
        assert_eq!(matrix.count_black(), 4);
        assert!(matrix.get(9, 3));
        assert!(!matrix.get(7, 3));
    }

    #[test]
    fn test_gray_image_roundtrip() {
        let mut matrix = BitMatrix::new(5, 3);
        matrix.set(0, 0, true);
        matrix.set(4, 2, true);
        let gray = matrix.to_gray_image();
        assert_eq!(BinaryImage::width(&gray), 5);
        assert_eq!(BinaryImage::height(&gray), 3);
        assert_eq!(BitMatrix::from_image(&gray), matrix);
    }
}
