//! Utility functions for number and string formatting.

pub mod format;

pub use format::{format_number, format_points, truncate_string};
