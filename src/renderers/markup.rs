//! Markup snapshot of the document
//!
//! This is what the content-change listener receives: text runs escaped,
//! breaks as `<br>`, tables as markup tables and mentions as tagged spans
//! carrying their identifier.

use quick_xml::escape::{escape, partial_escape};

use crate::models::{MentionNode, Segment, TableData};

pub const MENTION_CLASS: &str = "mention";

/// Serialize a whole document
pub fn to_markup(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text { text } => out.push_str(&partial_escape(text.as_str())),
            Segment::Break => out.push_str("<br>"),
            Segment::Table(node) => write_table(&mut out, &node.data),
            Segment::Mention(node) => write_mention(&mut out, node),
        }
    }
    out
}

fn write_table(out: &mut String, table: &TableData) {
    out.push_str("<table>");
    write_row(out, "th", &table.headers);
    for row in &table.rows {
        write_row(out, "td", row);
    }
    out.push_str("</table>");
}

fn write_row(out: &mut String, tag: &str, cells: &[String]) {
    out.push_str("<tr>");
    for cell in cells {
        out.push_str(&format!("<{tag}>{}</{tag}>", partial_escape(cell.as_str())));
    }
    out.push_str("</tr>");
}

fn write_mention(out: &mut String, node: &MentionNode) {
    out.push_str(&format!(
        "<span class=\"{}\" data-mention-id=\"{}\" contenteditable=\"false\">@{}</span>",
        MENTION_CLASS,
        escape(node.mention.id.as_str()),
        partial_escape(node.mention.display_name.as_str()),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeaderSource, Mention, NodeId, TableNode};

    #[test]
    fn test_text_and_breaks() {
        let segments = vec![Segment::text("a < b & c"), Segment::Break, Segment::text("d")];
        assert_eq!(to_markup(&segments), "a &lt; b &amp; c<br>d");
    }

    #[test]
    fn test_table_markup() {
        let segments = vec![Segment::Table(TableNode {
            id: NodeId(0),
            data: TableData {
                headers: vec!["Name".into(), "Age".into()],
                rows: vec![vec!["Alice".into(), "30".into()]],
                header_source: HeaderSource::FirstRow,
            },
        })];
        assert_eq!(
            to_markup(&segments),
            "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Alice</td><td>30</td></tr></table>"
        );
    }

    #[test]
    fn test_mention_markup() {
        let segments = vec![Segment::Mention(MentionNode {
            id: NodeId(2),
            mention: Mention {
                id: "u\"1".into(),
                display_name: "John Doe".into(),
            },
        })];
        assert_eq!(
            to_markup(&segments),
            "<span class=\"mention\" data-mention-id=\"u&quot;1\" contenteditable=\"false\">@John Doe</span>"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_markup(&[]), "");
    }
}
