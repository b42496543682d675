//! Text buffer with range cursors
//!
//! `RangeBuffer` is the capability the editor needs from its host surface:
//! read the current selection, delete a span, insert a node at a position,
//! and ask where a node starts and ends (setStartBefore / setStartAfter).
//! `SegmentBuffer` is the in-memory implementation backing the WASM surface.

use super::cursor::{DocPos, DocRange, Selection};
use crate::error::{EditError, Result};
use crate::models::document::{self, Segment};
use crate::models::{NodeId, TableData};

/// The plain-text run ending at (or containing) a caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Caret offset inside `text`, in characters
    pub caret: usize,
    /// Document position of the run's first character
    pub start: DocPos,
}

/// Core buffer trait
///
/// Implementations keep the segment sequence normalized: no empty text runs
/// and no two adjacent text runs.
pub trait RangeBuffer {
    /// The document content
    fn segments(&self) -> &[Segment];

    /// The host's current selection, `None` if there is no active range
    fn selection(&self) -> Option<Selection>;

    fn set_selection(&mut self, selection: Option<Selection>);

    /// Remove a span, returning the removed segments
    fn delete_range(&mut self, range: DocRange) -> Result<Vec<Segment>>;

    /// Insert a segment at a position, returning the span it now occupies
    fn insert_segment(&mut self, pos: DocPos, segment: Segment) -> Result<DocRange>;

    fn table_mut(&mut self, id: NodeId) -> Option<&mut TableData>;

    /// Hand out an id no node in this buffer has used
    fn allocate_node_id(&mut self) -> NodeId;

    /// Total length in slots
    fn len(&self) -> usize {
        document::slot_len(self.segments())
    }

    fn is_empty(&self) -> bool {
        self.segments().is_empty()
    }

    /// Span of an atomic node: `start` is the position before it, `end` after it
    fn node_span(&self, id: NodeId) -> Option<DocRange> {
        let mut offset = 0;
        for segment in self.segments() {
            if segment.node_id() == Some(id) {
                return Some(DocRange::single_slot(DocPos(offset)));
            }
            offset += segment.slot_len();
        }
        None
    }

    /// Text covered by a range, or `None` if the range leaves the document
    /// or covers anything other than plain text
    fn text_in(&self, range: DocRange) -> Option<String> {
        if range.end.0 > self.len() {
            return None;
        }

        let mut out = String::new();
        let mut offset = 0;
        for segment in self.segments() {
            let len = segment.slot_len();
            let lo = range.start.0.max(offset);
            let hi = range.end.0.min(offset + len);
            if lo < hi {
                match segment {
                    Segment::Text { text } => {
                        out.extend(text.chars().skip(lo - offset).take(hi - lo));
                    }
                    _ => return None,
                }
            }
            offset += len;
        }
        Some(out)
    }

    /// The text run whose characters end at or surround `pos`
    fn text_run_before(&self, pos: DocPos) -> Option<TextRun<'_>> {
        let mut offset = 0;
        for segment in self.segments() {
            let len = segment.slot_len();
            if let Segment::Text { text } = segment {
                if offset < pos.0 && pos.0 <= offset + len {
                    return Some(TextRun {
                        text,
                        caret: pos.0 - offset,
                        start: DocPos(offset),
                    });
                }
            }
            offset += len;
        }
        None
    }
}

/// Vec-backed segment buffer
#[derive(Debug, Clone, Default)]
pub struct SegmentBuffer {
    segments: Vec<Segment>,
    selection: Option<Selection>,
    next_id: u32,
}

impl SegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from existing content; no selection is active
    pub fn from_segments(mut segments: Vec<Segment>) -> Self {
        document::normalize(&mut segments);
        let next_id = segments
            .iter()
            .filter_map(Segment::node_id)
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(0);

        Self {
            segments,
            selection: None,
            next_id,
        }
    }

    /// Create a buffer holding one text run with the caret at its end
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::from_segments(vec![Segment::text(text)]);
        let end = DocPos(buffer.len());
        buffer.selection = Some(Selection::collapsed(end));
        buffer
    }

    fn check_pos(&self, pos: DocPos) -> Result<()> {
        let len = self.len();
        if pos.0 > len {
            return Err(EditError::OutOfBounds { pos: pos.0, len });
        }
        Ok(())
    }

    /// Make `pos` a segment boundary, splitting a text run if needed.
    /// Returns the index of the first segment at or after `pos`.
    fn split_at(&mut self, pos: DocPos) -> usize {
        let mut offset = 0;
        for i in 0..self.segments.len() {
            if offset == pos.0 {
                return i;
            }
            let len = self.segments[i].slot_len();
            if pos.0 < offset + len {
                if let Segment::Text { text } = &mut self.segments[i] {
                    let byte = text
                        .char_indices()
                        .nth(pos.0 - offset)
                        .map(|(b, _)| b)
                        .unwrap_or(text.len());
                    let tail = text.split_off(byte);
                    self.segments.insert(i + 1, Segment::text(tail));
                    return i + 1;
                }
            }
            offset += len;
        }
        self.segments.len()
    }

    fn shift_selection(&mut self, map: impl Fn(DocPos) -> DocPos) {
        if let Some(selection) = self.selection.as_mut() {
            selection.anchor = map(selection.anchor);
            selection.head = map(selection.head);
        }
    }
}

impl RangeBuffer for SegmentBuffer {
    fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        let len = self.len();
        self.selection = selection.map(|s| {
            Selection::new(DocPos(s.anchor.0.min(len)), DocPos(s.head.0.min(len)))
        });
    }

    fn delete_range(&mut self, range: DocRange) -> Result<Vec<Segment>> {
        self.check_pos(range.end)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        let removed: Vec<Segment> = self.segments.drain(first..last).collect();
        document::normalize(&mut self.segments);

        let removed_len = range.len();
        self.shift_selection(|pos| {
            if pos >= range.end {
                DocPos(pos.0 - removed_len)
            } else if pos > range.start {
                range.start
            } else {
                pos
            }
        });

        Ok(removed)
    }

    fn insert_segment(&mut self, pos: DocPos, segment: Segment) -> Result<DocRange> {
        self.check_pos(pos)?;

        let inserted_len = segment.slot_len();
        let index = self.split_at(pos);
        self.segments.insert(index, segment);
        document::normalize(&mut self.segments);

        self.shift_selection(|p| if p > pos { DocPos(p.0 + inserted_len) } else { p });

        Ok(DocRange::new(pos, DocPos(pos.0 + inserted_len)))
    }

    fn table_mut(&mut self, id: NodeId) -> Option<&mut TableData> {
        self.segments.iter_mut().find_map(|segment| match segment {
            Segment::Table(node) if node.id == id => Some(&mut node.data),
            _ => None,
        })
    }

    fn allocate_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mention, MentionNode};

    fn mention(id: u32) -> Segment {
        Segment::Mention(MentionNode {
            id: NodeId(id),
            mention: Mention {
                id: "1".into(),
                display_name: "John Doe".into(),
            },
        })
    }

    #[test]
    fn test_insert_splits_text_run() {
        let mut buffer = SegmentBuffer::from_text("hello world");
        let span = buffer.insert_segment(DocPos(5), Segment::Break).unwrap();
        assert_eq!(span, DocRange::between(5, 6));
        assert_eq!(
            buffer.segments(),
            &[Segment::text("hello"), Segment::Break, Segment::text(" world")]
        );
    }

    #[test]
    fn test_insert_text_merges() {
        let mut buffer = SegmentBuffer::from_text("ac");
        buffer.insert_segment(DocPos(1), Segment::text("b")).unwrap();
        assert_eq!(buffer.segments(), &[Segment::text("abc")]);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut buffer = SegmentBuffer::from_text("ab");
        let err = buffer.insert_segment(DocPos(3), Segment::Break).unwrap_err();
        assert_eq!(err, EditError::OutOfBounds { pos: 3, len: 2 });
    }

    #[test]
    fn test_delete_range_across_atoms() {
        let mut buffer =
            SegmentBuffer::from_segments(vec![Segment::text("ab"), mention(0), Segment::text("cd")]);
        let removed = buffer.delete_range(DocRange::between(1, 4)).unwrap();
        assert_eq!(removed, vec![Segment::text("b"), mention(0), Segment::text("c")]);
        assert_eq!(buffer.segments(), &[Segment::text("ad")]);
    }

    #[test]
    fn test_delete_shifts_selection() {
        let mut buffer = SegmentBuffer::from_text("abcdef");
        buffer.delete_range(DocRange::between(1, 3)).unwrap();
        assert_eq!(buffer.selection(), Some(Selection::collapsed(DocPos(4))));
    }

    #[test]
    fn test_unicode_split() {
        let mut buffer = SegmentBuffer::from_text("héllo");
        buffer.insert_segment(DocPos(2), Segment::Break).unwrap();
        assert_eq!(buffer.segments()[0], Segment::text("hé"));
        assert_eq!(buffer.text_in(DocRange::between(3, 6)).as_deref(), Some("llo"));
    }

    #[test]
    fn test_node_span() {
        let buffer =
            SegmentBuffer::from_segments(vec![Segment::text("ab"), mention(4), Segment::Break]);
        assert_eq!(buffer.node_span(NodeId(4)), Some(DocRange::between(2, 3)));
        assert_eq!(buffer.node_span(NodeId(9)), None);
    }

    #[test]
    fn test_text_in_rejects_atoms() {
        let buffer = SegmentBuffer::from_segments(vec![Segment::text("ab"), mention(0)]);
        assert_eq!(buffer.text_in(DocRange::between(0, 2)).as_deref(), Some("ab"));
        assert_eq!(buffer.text_in(DocRange::between(1, 3)), None);
        assert_eq!(buffer.text_in(DocRange::between(0, 9)), None);
    }

    #[test]
    fn test_text_run_before() {
        let buffer =
            SegmentBuffer::from_segments(vec![Segment::text("hi"), mention(0), Segment::text("@jo")]);
        let run = buffer.text_run_before(DocPos(6)).unwrap();
        assert_eq!(run.text, "@jo");
        assert_eq!(run.caret, 3);
        assert_eq!(run.start, DocPos(3));

        // Caret right after the mention is not inside any text run
        assert!(buffer.text_run_before(DocPos(3)).is_none());
    }

    #[test]
    fn test_allocate_ids_after_existing() {
        let mut buffer = SegmentBuffer::from_segments(vec![mention(7)]);
        assert_eq!(buffer.allocate_node_id(), NodeId(8));
        assert_eq!(buffer.allocate_node_id(), NodeId(9));
    }
}
