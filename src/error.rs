//! Error types for editor mutations
//!
//! Core operations return these errors; the event layer in `editor` turns
//! them into logged no-ops because the content-change contract has no error
//! channel.

use thiserror::Error;

use crate::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The host surface reports no caret or selection
    #[error("no active selection range")]
    NoActiveRange,

    #[error("position {pos} out of bounds (document length {len})")]
    OutOfBounds { pos: usize, len: usize },

    #[error("node {0} not found in document")]
    NodeNotFound(NodeId),

    #[error("node {0} is not a table")]
    NotATable(NodeId),

    #[error("cell {row}:{col} out of bounds")]
    CellOutOfBounds { row: usize, col: usize },

    /// The pending trigger's anchor no longer spans "@query"
    #[error("mention anchor no longer matches \"@{query}\"")]
    StaleAnchor { query: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EditError>;
