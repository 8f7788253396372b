//! Common utility functions.

pub mod fs;

// Re-export commonly used items
pub use fs::{dated_directory, dated_log_path, ensure_directory, join};
