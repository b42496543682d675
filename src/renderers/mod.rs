//! Renderers module for the rich text input
//!
//! Converts the document into the markup snapshot handed to listeners and
//! into view models JavaScript draws from.

pub mod display_list;
pub mod markup;
pub mod table;

// Re-export commonly used types
pub use display_list::{build_editor_view, EditorView, SuggestionDropdown, SuggestionItem};
pub use markup::to_markup;
pub use table::{build_table_widget, CellRole, CellWidget, TableWidget};
