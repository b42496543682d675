//! "@query" trigger detection
//!
//! Looks backward from the caret, inside the current text run only, for an
//! "@" that is not separated from the caret by whitespace.

use crate::text::{DocPos, DocRange, RangeBuffer};

/// An unterminated "@query" the user is typing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMentionTrigger {
    /// Text between "@" (exclusive) and the caret
    pub query: String,
    /// Span from "@" (inclusive) to the caret
    pub anchor: DocRange,
}

impl PendingMentionTrigger {
    /// The exact text the anchor must still cover for a commit to apply
    pub fn anchor_text(&self) -> String {
        format!("@{}", self.query)
    }

    /// Whether the anchor still names "@query" in the buffer
    pub fn is_valid_in<B: RangeBuffer + ?Sized>(&self, buffer: &B) -> bool {
        buffer.text_in(self.anchor).as_deref() == Some(self.anchor_text().as_str())
    }
}

/// Character index of the "@" starting a trigger that ends at `caret`.
///
/// Scanning stops at whitespace (including line breaks inside the run).
pub fn scan_for_trigger(run: &str, caret: usize) -> Option<usize> {
    let before: Vec<char> = run.chars().take(caret).collect();
    for (index, ch) in before.iter().enumerate().rev() {
        if *ch == '@' {
            return Some(index);
        }
        if ch.is_whitespace() {
            return None;
        }
    }
    None
}

/// Detect a trigger at the buffer's caret.
///
/// Only a collapsed caret inside a plain-text run can trigger.
pub fn detect_trigger<B: RangeBuffer + ?Sized>(buffer: &B) -> Option<PendingMentionTrigger> {
    let selection = buffer.selection()?;
    if !selection.is_collapsed() {
        return None;
    }

    let caret = selection.head;
    let run = buffer.text_run_before(caret)?;
    let at = scan_for_trigger(run.text, run.caret)?;

    let query: String = run
        .text
        .chars()
        .skip(at + 1)
        .take(run.caret - at - 1)
        .collect();

    Some(PendingMentionTrigger {
        query,
        anchor: DocRange::new(DocPos(run.start.0 + at), caret),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use crate::text::{SegmentBuffer, Selection};

    #[test]
    fn test_scan_finds_at() {
        assert_eq!(scan_for_trigger("hi @jo", 6), Some(3));
        assert_eq!(scan_for_trigger("@", 1), Some(0));
    }

    #[test]
    fn test_scan_stops_at_whitespace() {
        assert_eq!(scan_for_trigger("@jo hn", 6), None);
        assert_eq!(scan_for_trigger("@jo\nhn", 6), None);
        assert_eq!(scan_for_trigger("hello", 5), None);
    }

    #[test]
    fn test_scan_only_looks_before_caret() {
        assert_eq!(scan_for_trigger("ab@cd", 2), None);
        assert_eq!(scan_for_trigger("ab@cd", 4), Some(2));
    }

    #[test]
    fn test_detect_trigger_records_anchor() {
        let buffer = SegmentBuffer::from_text("Hello @jo");
        let trigger = detect_trigger(&buffer).unwrap();
        assert_eq!(trigger.query, "jo");
        assert_eq!(trigger.anchor, DocRange::between(6, 9));
        assert!(trigger.is_valid_in(&buffer));
    }

    #[test]
    fn test_email_like_text_triggers() {
        // No whitespace between "@" and caret, so this is a trigger
        let buffer = SegmentBuffer::from_text("mail me@ex");
        assert_eq!(detect_trigger(&buffer).unwrap().query, "ex");
    }

    #[test]
    fn test_no_trigger_for_selection_range() {
        let mut buffer = SegmentBuffer::from_text("@jo");
        buffer.set_selection(Some(Selection::new(DocPos(1), DocPos(3))));
        assert!(detect_trigger(&buffer).is_none());
    }

    #[test]
    fn test_no_trigger_after_break() {
        let mut buffer = SegmentBuffer::from_segments(vec![Segment::text("@jo"), Segment::Break]);
        buffer.set_selection(Some(Selection::collapsed(DocPos(4))));
        assert!(detect_trigger(&buffer).is_none());
    }

    #[test]
    fn test_stale_anchor_is_invalid() {
        let mut buffer = SegmentBuffer::from_text("Hi @jo");
        let trigger = detect_trigger(&buffer).unwrap();
        buffer.delete_range(DocRange::between(0, 1)).unwrap();
        assert!(!trigger.is_valid_in(&buffer));
    }
}
