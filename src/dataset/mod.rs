//! Tools that operate on the annotated corpus after the session

/// 8-bit HSV conversion used by the enhancement filter
pub mod color;
/// Ink recoloring for text contrast
pub mod enhance;
/// Reproducible train/validation partitioning
pub mod split;
