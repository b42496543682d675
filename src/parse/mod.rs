//! Parsing module for the rich text input
//!
//! Turns pasted clipboard text into structured content.

pub mod tabular;

// Re-export commonly used types
pub use tabular::{is_tabular, parse_clipboard, parse_table, ClipboardContent};
