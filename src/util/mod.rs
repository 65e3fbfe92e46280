//! Utility functions for the `rss2json` binary.
//!
//! - **Output files**: atomic write-to-temp-then-rename
//! - **JSON rendering**: compact or four-space indented output

mod fs;
mod json;

pub use fs::atomic_write;
pub use json::to_json_string;
