//! Selection/range controller
//!
//! Every structural change to the document goes through these functions so
//! the caret always ends up in a defined place and atomic nodes are only ever
//! inserted or removed whole. They work against any `RangeBuffer`.

use crate::error::{EditError, Result};
use crate::mentions::PendingMentionTrigger;
use crate::models::{CellPos, Mention, MentionNode, NodeId, Segment, TableData, TableNode};
use crate::text::{DocPos, DocRange, RangeBuffer, Selection};

fn active_range<B: RangeBuffer + ?Sized>(buffer: &B) -> Result<DocRange> {
    buffer
        .selection()
        .map(|selection| selection.range())
        .ok_or(EditError::NoActiveRange)
}

fn collapse_to<B: RangeBuffer + ?Sized>(buffer: &mut B, pos: DocPos) {
    buffer.set_selection(Some(Selection::collapsed(pos)));
}

/// Replace the selection with plain text; caret after it
pub fn replace_selection_with_text<B: RangeBuffer + ?Sized>(
    buffer: &mut B,
    text: &str,
) -> Result<DocRange> {
    let range = active_range(buffer)?;
    buffer.delete_range(range)?;
    let span = buffer.insert_segment(range.start, Segment::text(text))?;
    collapse_to(buffer, span.end);
    Ok(span)
}

/// Replace the selection with a table flanked by line breaks; caret after
/// the trailing break
pub fn paste_table<B: RangeBuffer + ?Sized>(buffer: &mut B, data: TableData) -> Result<NodeId> {
    let range = active_range(buffer)?;
    buffer.delete_range(range)?;

    let id = buffer.allocate_node_id();
    buffer.insert_segment(range.start, Segment::Table(TableNode { id, data }))?;

    let before = buffer.node_span(id).ok_or(EditError::NodeNotFound(id))?.start;
    buffer.insert_segment(before, Segment::Break)?;

    let after = buffer.node_span(id).ok_or(EditError::NodeNotFound(id))?.end;
    let separator = buffer.insert_segment(after, Segment::Break)?;

    collapse_to(buffer, separator.end);
    Ok(id)
}

/// Replace the selection with a single line break
pub fn insert_line_break<B: RangeBuffer + ?Sized>(buffer: &mut B) -> Result<DocRange> {
    let range = active_range(buffer)?;
    buffer.delete_range(range)?;
    let span = buffer.insert_segment(range.start, Segment::Break)?;
    collapse_to(buffer, span.end);
    Ok(span)
}

/// Remove one atomic node; caret where it stood
pub fn delete_node<B: RangeBuffer + ?Sized>(buffer: &mut B, id: NodeId) -> Result<Segment> {
    let span = buffer.node_span(id).ok_or(EditError::NodeNotFound(id))?;
    let mut removed = buffer.delete_range(span)?;
    collapse_to(buffer, span.start);
    removed.pop().ok_or(EditError::NodeNotFound(id))
}

/// Replace the trigger's "@query" span with a mention token and one space.
///
/// The anchor is re-validated first: if the text under it is no longer
/// exactly "@query", nothing changes and `StaleAnchor` is returned.
pub fn commit_mention<B: RangeBuffer + ?Sized>(
    buffer: &mut B,
    trigger: &PendingMentionTrigger,
    mention: Mention,
) -> Result<NodeId> {
    if !trigger.is_valid_in(buffer) {
        return Err(EditError::StaleAnchor {
            query: trigger.query.clone(),
        });
    }

    buffer.delete_range(trigger.anchor)?;

    let id = buffer.allocate_node_id();
    let token = buffer.insert_segment(trigger.anchor.start, Segment::Mention(MentionNode { id, mention }))?;
    let space = buffer.insert_segment(token.end, Segment::text(" "))?;

    collapse_to(buffer, space.end);
    Ok(id)
}

/// Backspace default: remove the selection, or the slot before the caret.
/// Returns whether anything was removed.
pub fn delete_backward<B: RangeBuffer + ?Sized>(buffer: &mut B) -> Result<bool> {
    let range = active_range(buffer)?;
    let target = if range.is_empty() {
        match range.start.0.checked_sub(1) {
            Some(prev) => DocRange::single_slot(DocPos(prev)),
            None => return Ok(false),
        }
    } else {
        range
    };

    buffer.delete_range(target)?;
    collapse_to(buffer, target.start);
    Ok(true)
}

/// Delete default: remove the selection, or the slot after the caret.
/// Returns whether anything was removed.
pub fn delete_forward<B: RangeBuffer + ?Sized>(buffer: &mut B) -> Result<bool> {
    let range = active_range(buffer)?;
    let target = if range.is_empty() {
        if range.start.0 >= buffer.len() {
            return Ok(false);
        }
        DocRange::single_slot(range.start)
    } else {
        range
    };

    buffer.delete_range(target)?;
    collapse_to(buffer, target.start);
    Ok(true)
}

/// Edit one table cell in place
pub fn edit_cell<B: RangeBuffer + ?Sized>(
    buffer: &mut B,
    id: NodeId,
    pos: CellPos,
    text: &str,
) -> Result<()> {
    if buffer.node_span(id).is_none() {
        return Err(EditError::NodeNotFound(id));
    }
    let table = buffer.table_mut(id).ok_or(EditError::NotATable(id))?;
    table.set_cell(pos, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentions::detect_trigger;
    use crate::models::HeaderDetection;
    use crate::parse::parse_table;
    use crate::renderers::markup::to_markup;
    use crate::text::SegmentBuffer;

    fn grid() -> TableData {
        parse_table("a\tb\n1\t2", HeaderDetection::FirstRow)
    }

    fn john() -> Mention {
        Mention {
            id: "1".into(),
            display_name: "John Doe".into(),
        }
    }

    #[test]
    fn test_paste_table_flanked_by_breaks() {
        let mut buffer = SegmentBuffer::from_text("before after");
        buffer.set_selection(Some(Selection::collapsed(DocPos(7))));

        let id = paste_table(&mut buffer, grid()).unwrap();

        let segments = buffer.segments();
        assert_eq!(segments[0], Segment::text("before "));
        assert_eq!(segments[1], Segment::Break);
        assert_eq!(segments[2].node_id(), Some(id));
        assert_eq!(segments[3], Segment::Break);
        assert_eq!(segments[4], Segment::text("after"));

        // Caret right after the trailing break
        assert_eq!(buffer.selection(), Some(Selection::collapsed(DocPos(10))));
    }

    #[test]
    fn test_paste_table_replaces_selection() {
        let mut buffer = SegmentBuffer::from_text("keep DROP keep");
        buffer.set_selection(Some(Selection::new(DocPos(5), DocPos(9))));
        paste_table(&mut buffer, grid()).unwrap();
        assert_eq!(crate::models::document::visible_text(buffer.segments()), "keep  keep");
    }

    #[test]
    fn test_no_active_range_is_an_error() {
        let mut buffer = SegmentBuffer::new();
        assert_eq!(paste_table(&mut buffer, grid()), Err(EditError::NoActiveRange));
        assert_eq!(insert_line_break(&mut buffer), Err(EditError::NoActiveRange));
        assert!(buffer.segments().is_empty());
    }

    #[test]
    fn test_replace_selection_with_text() {
        let mut buffer = SegmentBuffer::from_text("hello");
        buffer.set_selection(Some(Selection::new(DocPos(1), DocPos(4))));
        let span = replace_selection_with_text(&mut buffer, "EY\nYO").unwrap();
        assert_eq!(span, DocRange::between(1, 6));
        assert_eq!(buffer.segments(), &[Segment::text("hEY\nYOo")]);
        assert_eq!(buffer.selection(), Some(Selection::collapsed(DocPos(6))));
    }

    #[test]
    fn test_delete_node_keeps_surroundings() {
        let mut buffer = SegmentBuffer::from_text("x");
        let id = paste_table(&mut buffer, grid()).unwrap();
        buffer.insert_segment(DocPos(buffer.len()), Segment::text("y")).unwrap();

        let before = to_markup(buffer.segments());
        let removed = delete_node(&mut buffer, id).unwrap();

        assert_eq!(removed.node_id(), Some(id));
        assert_eq!(to_markup(buffer.segments()), "x<br><br>y");
        assert_eq!(before.replace(&to_markup(&[removed]), ""), "x<br><br>y");
        assert_eq!(buffer.selection(), Some(Selection::collapsed(DocPos(2))));
    }

    #[test]
    fn test_commit_mention() {
        let mut buffer = SegmentBuffer::from_text("Hi @jo");
        let trigger = detect_trigger(&buffer).unwrap();

        let id = commit_mention(&mut buffer, &trigger, john()).unwrap();

        assert_eq!(buffer.segments().len(), 3);
        assert_eq!(buffer.segments()[0], Segment::text("Hi "));
        assert_eq!(buffer.segments()[1].node_id(), Some(id));
        assert_eq!(buffer.segments()[2], Segment::text(" "));
        assert_eq!(buffer.selection(), Some(Selection::collapsed(DocPos(5))));
    }

    #[test]
    fn test_commit_mention_stale_anchor() {
        let mut buffer = SegmentBuffer::from_text("Hi @jo");
        let trigger = detect_trigger(&buffer).unwrap();
        buffer.insert_segment(DocPos(4), Segment::text("x")).unwrap();

        let err = commit_mention(&mut buffer, &trigger, john()).unwrap_err();
        assert_eq!(err, EditError::StaleAnchor { query: "jo".into() });
        assert_eq!(buffer.segments(), &[Segment::text("Hi @xjo")]);
    }

    #[test]
    fn test_delete_backward_removes_mention_whole() {
        let mut buffer = SegmentBuffer::from_text("@jo");
        let trigger = detect_trigger(&buffer).unwrap();
        commit_mention(&mut buffer, &trigger, john()).unwrap();

        assert!(delete_backward(&mut buffer).unwrap()); // the space
        assert!(delete_backward(&mut buffer).unwrap()); // the mention
        assert!(buffer.segments().is_empty());
        assert!(!delete_backward(&mut buffer).unwrap());
    }

    #[test]
    fn test_delete_forward() {
        let mut buffer = SegmentBuffer::from_text("ab");
        buffer.set_selection(Some(Selection::collapsed(DocPos(0))));
        assert!(delete_forward(&mut buffer).unwrap());
        assert_eq!(buffer.segments(), &[Segment::text("b")]);

        buffer.set_selection(Some(Selection::collapsed(DocPos(1))));
        assert!(!delete_forward(&mut buffer).unwrap());
    }

    #[test]
    fn test_edit_cell() {
        let mut buffer = SegmentBuffer::from_text("");
        let id = paste_table(&mut buffer, grid()).unwrap();

        edit_cell(&mut buffer, id, CellPos::Body(0, 1), "42").unwrap();
        assert!(to_markup(buffer.segments()).contains("<td>42</td>"));

        assert_eq!(
            edit_cell(&mut buffer, NodeId(99), CellPos::Header(0), "x"),
            Err(EditError::NodeNotFound(NodeId(99)))
        );
    }
}
