//! Models module for the rich text input
//!
//! Data structures for the document (text runs, breaks, embedded tables and
//! mentions), the parsed grid, mention directory entries and configuration.

pub mod config;
pub mod document;
pub mod mention;
pub mod table;

// Re-export commonly used types
pub use config::{EditorConfig, HeaderDetection};
pub use document::{MentionNode, NodeId, Segment, TableNode};
pub use mention::{Mention, MentionCandidate, DEFAULT_DIRECTORY};
pub use table::{CellPos, HeaderSource, Row, TableData};
