//! Layer 0: Text buffer and range cursors
//!
//! The editable surface as the rest of the crate sees it: a normalized
//! segment sequence, a selection, and span-level insert/delete.
//!
//! ## Modules
//!
//! - `buffer`: the `RangeBuffer` capability and its Vec-backed implementation
//! - `cursor`: slot positions, ranges and selections

pub mod buffer;
pub mod cursor;

// Re-exports for convenience
pub use buffer::{RangeBuffer, SegmentBuffer, TextRun};
pub use cursor::{DocPos, DocRange, Selection};
