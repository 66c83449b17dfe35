//! Core functionality for goload

pub mod resolver;
pub mod video_source;

pub use resolver::*;
pub use video_source::*;
