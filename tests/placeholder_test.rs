//! Placeholder visibility across focus, edits and blur cleanup

use richtext_wasm::models::config::DEFAULT_BLUR_CLEANUP_DELAY_MS;
use richtext_wasm::models::{MentionNode, TableNode};
use richtext_wasm::parse::parse_table;
use richtext_wasm::{
    EditorConfig, HeaderDetection, Key, Mention, NodeId, RichTextEditor, Segment, SegmentBuffer,
};

fn editor() -> RichTextEditor {
    RichTextEditor::new(EditorConfig::default()).unwrap()
}

fn blur_and_settle(editor: &mut RichTextEditor, now: f64) {
    editor.blur(now);
    assert!(editor.tick(now + DEFAULT_BLUR_CLEANUP_DELAY_MS));
}

#[test]
fn test_focus_hides_and_paste_keeps_hidden() {
    let mut editor = editor();
    assert!(editor.placeholder_visible());

    editor.focus();
    assert!(!editor.placeholder_visible());
    assert!(!editor.view().placeholder_visible);

    editor.paste("a\tb\nc\td");
    assert!(!editor.placeholder_visible());

    blur_and_settle(&mut editor, 0.0);
    assert!(!editor.placeholder_visible());
}

#[test]
fn test_placeholder_returns_when_emptied() {
    let mut editor = editor();
    editor.focus();
    editor.input_text("hi");
    assert!(!editor.placeholder_visible());

    editor.delete_backward();
    assert!(!editor.placeholder_visible());
    editor.delete_backward();
    assert!(editor.is_empty());

    editor.focus();
    assert!(!editor.placeholder_visible());

    blur_and_settle(&mut editor, 500.0);
    assert!(editor.placeholder_visible());
}

#[test]
fn test_whitespace_only_counts_as_empty() {
    let mut editor = editor();
    editor.focus();
    editor.input_text("  ");
    editor.key_down(Key::Enter);

    assert!(editor.is_empty());
    blur_and_settle(&mut editor, 0.0);
    assert!(editor.placeholder_visible());
}

#[test]
fn test_lone_table_is_not_empty() {
    let table = Segment::Table(TableNode {
        id: NodeId(0),
        data: parse_table("a\tb\nc\td", HeaderDetection::FirstRow),
    });
    let buffer = SegmentBuffer::from_segments(vec![table]);
    let mut editor = RichTextEditor::with_buffer(buffer, EditorConfig::default()).unwrap();

    assert!(!editor.is_empty());
    assert!(!editor.placeholder_visible());

    editor.focus();
    blur_and_settle(&mut editor, 0.0);
    assert!(!editor.placeholder_visible());
}

#[test]
fn test_lone_mention_is_not_empty() {
    let mention = Segment::Mention(MentionNode {
        id: NodeId(0),
        mention: Mention {
            id: "1".into(),
            display_name: "John Doe".into(),
        },
    });
    let buffer = SegmentBuffer::from_segments(vec![mention]);
    let mut editor = RichTextEditor::with_buffer(buffer, EditorConfig::default()).unwrap();

    assert!(!editor.is_empty());
    assert!(!editor.placeholder_visible());

    editor.focus();
    blur_and_settle(&mut editor, 0.0);
    assert!(!editor.placeholder_visible());
}
