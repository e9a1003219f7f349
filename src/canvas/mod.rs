//! Fixed-size canvas frames and the coordinates drawn on them

/// Normalized detection-box encoding of regions
pub mod encoding;
/// Canvas frame rendering and preview overlays
pub mod render;
