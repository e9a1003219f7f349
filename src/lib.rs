//! Annotation session and dataset tools for prescription OCR images
//!
//! The annotation session shows one image at a time on a fixed square canvas,
//! collects operator-drawn, labeled regions, and writes each finished image as
//! a resized frame, a detection label file, and per-region crops. Companion
//! tools split the annotated corpus into train/validation sets and recolor ink
//! for contrast.

#![forbid(unsafe_code)]

/// Canvas rendering and detection-box encoding
pub mod canvas;
/// Train/validation split and ink enhancement tools
pub mod dataset;
/// Input/output, configuration and error handling
pub mod io;
/// Annotation session state machine and its controller
pub mod session;
/// Prescription index and image queue loaded at startup
pub mod sources;

pub use io::error::{DatasetError, Result};
