//! Table widget builder
//!
//! Builds the view model JavaScript renders for an embedded table: header
//! and data cells with distinct roles, every cell editable in place, and the
//! selection outline when the table is the selected node.

use serde::{Deserialize, Serialize};

use crate::models::{CellPos, NodeId, TableNode};

/// Outline drawn around the selected table
pub const SELECTION_OUTLINE: &str = "2px solid #3b82f6";

/// Hint shown while a table is selected
pub const DELETE_HINT: &str = "Press Delete to remove table";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CellRole {
    Header,
    Data,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellWidget {
    pub role: CellRole,
    pub text: String,
    /// Address to pass back when the cell's text is edited
    pub pos: CellPos,
    pub editable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableWidget {
    pub id: NodeId,
    /// Header row first, then data rows
    pub rows: Vec<Vec<CellWidget>>,
    pub selected: bool,
    pub outline: Option<String>,
}

pub fn build_table_widget(node: &TableNode, selected: bool) -> TableWidget {
    let table = &node.data;
    let mut rows = Vec::with_capacity(table.rows.len() + 1);

    rows.push(
        table
            .headers
            .iter()
            .enumerate()
            .map(|(col, text)| CellWidget {
                role: CellRole::Header,
                text: text.clone(),
                pos: CellPos::Header(col),
                editable: true,
            })
            .collect(),
    );

    for (row_index, row) in table.rows.iter().enumerate() {
        rows.push(
            row.iter()
                .enumerate()
                .map(|(col, text)| CellWidget {
                    role: CellRole::Data,
                    text: text.clone(),
                    pos: CellPos::Body(row_index, col),
                    editable: true,
                })
                .collect(),
        );
    }

    TableWidget {
        id: node.id,
        rows,
        selected,
        outline: selected.then(|| SELECTION_OUTLINE.to_string()),
    }
}
