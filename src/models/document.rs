//! Document content: a flat sequence of inline segments
//!
//! Free text, line breaks and the embedded atomic widgets (tables, mentions)
//! live side by side in one `Vec<Segment>`. Positions address this sequence
//! in slots: one slot per text character, one slot per break/table/mention.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mention::Mention;
use super::table::TableData;

/// Identity of an embedded atomic node (table or mention)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TableNode {
    pub id: NodeId,
    pub data: TableData,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MentionNode {
    pub id: NodeId,
    pub mention: Mention,
}

/// One inline unit of the document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment {
    Text { text: String },
    Break,
    Table(TableNode),
    Mention(MentionNode),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    /// Number of slots this segment occupies
    pub fn slot_len(&self) -> usize {
        match self {
            Segment::Text { text } => text.chars().count(),
            Segment::Break | Segment::Table(_) | Segment::Mention(_) => 1,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Segment::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Id of the atomic node, if this segment is one
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Segment::Table(node) => Some(node.id),
            Segment::Mention(node) => Some(node.id),
            Segment::Text { .. } | Segment::Break => None,
        }
    }

    pub fn is_atomic(&self) -> bool {
        self.node_id().is_some()
    }
}

/// Total slot length of a segment sequence
pub fn slot_len(segments: &[Segment]) -> usize {
    segments.iter().map(Segment::slot_len).sum()
}

/// Visible text of the free-text runs (the surface's `textContent` minus widgets)
pub fn visible_text(segments: &[Segment]) -> String {
    segments.iter().filter_map(Segment::as_text).collect()
}

/// True iff the visible text trims to nothing and there is no table or mention
pub fn is_blank(segments: &[Segment]) -> bool {
    visible_text(segments).trim().is_empty() && !segments.iter().any(Segment::is_atomic)
}

/// Merge adjacent text runs and drop empty ones
pub fn normalize(segments: &mut Vec<Segment>) {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments.drain(..) {
        if let Segment::Text { text } = &segment {
            if text.is_empty() {
                continue;
            }
            if let Some(Segment::Text { text: prev }) = merged.last_mut() {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(segment);
    }
    *segments = merged;
}
