use thiserror::Error;

/// Why a contour could not be turned into path commands.
///
/// Both variants are local to one contour: a caller drawing many glyphs should skip the contour (or
/// glyph) and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    #[error("contour has no points")]
    EmptyContour,
    /// Two circularly consecutive off-curve points survived interspersion, or the sequence does
    /// not start on-curve. Either the input bypassed [`crate::intersperse`] or it has a bug.
    #[error("malformed contour: off-curve point at index {index} has no on-curve neighbour to end its curve")]
    MalformedContour { index: usize },
}
