//! Utility functions for goload

pub mod url;

pub use self::url::*;
