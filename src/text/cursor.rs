//! Caret and selection positions
//!
//! Positions are slot offsets into the document: each text character is one
//! slot and each break, table or mention is one slot.

use serde::{Deserialize, Serialize};

/// A slot offset in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocPos(pub usize);

impl DocPos {
    pub fn zero() -> Self {
        DocPos(0)
    }

    pub fn offset(self) -> usize {
        self.0
    }
}

/// A range of slots from start (inclusive) to end (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRange {
    pub start: DocPos,
    pub end: DocPos,
}

impl DocRange {
    pub fn new(start: DocPos, end: DocPos) -> Self {
        Self { start, end }
    }

    /// Build a range from two offsets, in either order
    pub fn between(a: usize, b: usize) -> Self {
        Self::new(DocPos(a.min(b)), DocPos(a.max(b)))
    }

    pub fn collapsed(pos: DocPos) -> Self {
        Self { start: pos, end: pos }
    }

    /// Create a range covering a single slot
    pub fn single_slot(pos: DocPos) -> Self {
        Self {
            start: pos,
            end: DocPos(pos.0 + 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn contains(&self, pos: DocPos) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// Selection state (anchor + head)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started
    pub anchor: DocPos,
    /// Current caret position
    pub head: DocPos,
}

impl Selection {
    pub fn new(anchor: DocPos, head: DocPos) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret only)
    pub fn collapsed(pos: DocPos) -> Self {
        Self { anchor: pos, head: pos }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the range covered by this selection (ordered start to end)
    pub fn range(&self) -> DocRange {
        if self.anchor <= self.head {
            DocRange::new(self.anchor, self.head)
        } else {
            DocRange::new(self.head, self.anchor)
        }
    }
}
