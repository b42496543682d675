//! Display list for the editable surface
//!
//! Everything JavaScript needs to draw the component around the document
//! content: placeholder, table widgets, the selection hint and the mention
//! dropdown. No layout is computed here; the host positions the dropdown at
//! the caret.

use serde::{Deserialize, Serialize};

use super::table::{build_table_widget, TableWidget, DELETE_HINT};
use crate::mentions::{PendingMentionTrigger, SuggestionList};
use crate::models::mention::DEFAULT_AVATAR;
use crate::models::{EditorConfig, NodeId, Segment};

/// Top-level view state
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub placeholder: String,
    pub placeholder_visible: bool,

    /// CSS max-height for the scrolling surface
    pub max_height: String,

    /// Widgets for every embedded table, in document order
    pub tables: Vec<TableWidget>,

    pub selected_table: Option<NodeId>,

    /// Shown while a table is selected
    pub selection_hint: Option<String>,

    /// Present only while a trigger is pending and candidates exist
    pub suggestions: Option<SuggestionDropdown>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDropdown {
    pub query: String,
    pub items: Vec<SuggestionItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar: String,
    pub highlighted: bool,
}

pub fn build_editor_view(
    segments: &[Segment],
    config: &EditorConfig,
    placeholder_visible: bool,
    selected_table: Option<NodeId>,
    trigger: Option<&PendingMentionTrigger>,
    suggestions: &SuggestionList,
) -> EditorView {
    let tables = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Table(node) => Some(build_table_widget(node, Some(node.id) == selected_table)),
            _ => None,
        })
        .collect();

    let dropdown = match trigger {
        Some(trigger) if !suggestions.is_empty() => Some(SuggestionDropdown {
            query: trigger.query.clone(),
            items: suggestions
                .items()
                .iter()
                .enumerate()
                .map(|(index, candidate)| SuggestionItem {
                    id: candidate.id.clone(),
                    name: candidate.name.clone(),
                    email: candidate.email.clone(),
                    avatar: candidate
                        .avatar
                        .clone()
                        .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
                    highlighted: index == suggestions.highlighted_index(),
                })
                .collect(),
        }),
        _ => None,
    };

    EditorView {
        placeholder: config.placeholder.clone(),
        placeholder_visible,
        max_height: config.max_height.clone(),
        tables,
        selected_table,
        selection_hint: selected_table.map(|_| DELETE_HINT.to_string()),
        suggestions: dropdown,
    }
}
