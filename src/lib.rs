//! Rich Text Input WASM Module
//!
//! An editable text component core: spreadsheet clipboard data is pasted as
//! embedded tables, typing `@` opens a people picker that inserts atomic
//! mention tokens, and every mutation is reported as a markup snapshot.
//!
//! The DOM stays in JavaScript. The host forwards events to `RichTextInput`
//! and renders from the view model and markup it gets back.

pub mod error;
pub mod models;
pub mod parse;
pub mod text;
pub mod renderers;
pub mod mentions;
pub mod editor;
pub mod api;

// Re-export commonly used types
pub use api::{RichTextInput, global_pointer_down, parse_clipboard_js};
pub use editor::{Key, KeyOutcome, PointerHub, PointerTarget, RichTextEditor, SurfaceId};
pub use error::{EditError, Result};
pub use models::{
    CellPos, EditorConfig, HeaderDetection, Mention, MentionCandidate, NodeId, Segment, TableData,
};
pub use text::{DocPos, DocRange, RangeBuffer, SegmentBuffer, Selection};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Rich text input WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        crate::wasm_warn!("logger already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
