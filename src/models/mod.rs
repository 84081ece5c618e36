/// Binary image trait and bit-packed matrix
pub mod matrix;
/// Points and lines
pub mod point;
/// Detection result
pub mod result;
/// Corners, orientation and the sixteen-point vertex set
pub mod vertices;

pub use matrix::{BinaryImage, BitMatrix};
pub use point::{Line, Point};
pub use result::DetectorResult;
pub use vertices::{Corner, Corners, GuardVertices, Orientation, Side, VertexSet};
