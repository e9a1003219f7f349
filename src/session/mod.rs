//! Annotation session
//!
//! - Canvas geometry for drafts and regions
//! - The pure state machine
//! - The controller binding it to images and output folders

/// Session controller over sources and the persistence writer
pub mod controller;
/// Canvas points, rectangles, drafts and regions
pub mod region;
/// Session states, events and transitions
pub mod state;

pub use state::{Session, SessionEvent, SessionState};
