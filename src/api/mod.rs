//! Rich Text Input WASM API
//!
//! The JavaScript-facing surface of the component.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serde-wasm-bindgen conversion and error mapping
//! - `core`: the `RichTextInput` class and page-level functions

pub mod helpers;
pub mod core;

pub use core::{RichTextInput, global_pointer_down, parse_clipboard_js};
