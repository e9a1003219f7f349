/// Command-line parsing and tool dispatch
pub mod cli;
/// Dataset constants and defaults
pub mod configuration;
/// Operator console for the annotation session
pub mod console;
/// Error types and path context
pub mod error;
/// Image decoding and encoding helpers
pub mod image;
/// Output layout and per-image persistence
pub mod persistence;
/// Batch progress display
pub mod progress;
