//! WASM API for the rich text input
//!
//! `RichTextInput` is the JavaScript-facing component. The host wires its
//! contenteditable events to these methods and renders from `getView()` and
//! the markup passed to the change listener. Outside clicks are reported
//! page-wide through `globalPointerDown`.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, deserialize_or_default, edit_error, now_ms, serialize};
use crate::editor::{Key, PointerHub, PointerTarget, RichTextEditor, SurfaceId};
use crate::mentions::MentionSearch;
use crate::models::{CellPos, EditorConfig, HeaderDetection, MentionCandidate, NodeId};
use crate::parse::{parse_clipboard, ClipboardContent};
use crate::text::{DocPos, Selection};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

// One hub per page; every editor subscribes on construction
thread_local! {
    static POINTER_HUB: PointerHub = PointerHub::new();
}

/// Mention lookup backed by a JS function `query => candidates[]`
struct JsMentionSearch {
    function: js_sys::Function,
}

impl MentionSearch for JsMentionSearch {
    fn search(&self, query: &str) -> Vec<MentionCandidate> {
        let result = match self.function.call1(&JsValue::NULL, &JsValue::from_str(query)) {
            Ok(result) => result,
            Err(e) => {
                wasm_error!("mention search threw: {:?}", e);
                return Vec::new();
            }
        };

        serde_wasm_bindgen::from_value(result).unwrap_or_else(|e| {
            wasm_warn!("mention search returned invalid candidates: {}", e);
            Vec::new()
        })
    }
}

#[wasm_bindgen]
pub struct RichTextInput {
    editor: RichTextEditor,
}

#[wasm_bindgen]
impl RichTextInput {
    /// Create an editor. `config` is optional; missing fields use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<RichTextInput, JsValue> {
        let config: EditorConfig = deserialize_or_default(config, "Invalid editor config")?;
        let mut editor = RichTextEditor::new(config).map_err(edit_error)?;
        POINTER_HUB.with(|hub| editor.mount(hub));

        wasm_info!("RichTextInput created (surface {})", editor.surface_id().0);
        Ok(RichTextInput { editor })
    }

    #[wasm_bindgen(getter, js_name = surfaceId)]
    pub fn surface_id(&self) -> u32 {
        self.editor.surface_id().0
    }

    /// Register the content-change listener (receives the markup string)
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, listener: Option<js_sys::Function>) {
        match listener {
            Some(listener) => self.editor.on_change(move |content| {
                if let Err(e) = listener.call1(&JsValue::NULL, &JsValue::from_str(content)) {
                    wasm_error!("change listener threw: {:?}", e);
                }
            }),
            None => self.editor.clear_on_change(),
        }
    }

    /// Install (or with `undefined`, remove) an external mention search
    #[wasm_bindgen(js_name = setMentionSearch)]
    pub fn set_mention_search(&mut self, search: Option<js_sys::Function>) {
        let search = search
            .map(|function| Box::new(JsMentionSearch { function }) as Box<dyn MentionSearch>);
        self.editor.set_mention_search(search);
    }

    /// Paste handler; the host must always call `preventDefault`
    #[wasm_bindgen(js_name = handlePaste)]
    pub fn handle_paste(&mut self, text: &str) -> bool {
        wasm_log!("handlePaste: {} bytes", text.len());
        self.editor.paste(text)
    }

    /// Text inserted by the host's default typing behavior
    #[wasm_bindgen(js_name = handleInput)]
    pub fn handle_input(&mut self, text: &str) -> bool {
        self.editor.input_text(text)
    }

    #[wasm_bindgen(js_name = deleteBackward)]
    pub fn delete_backward(&mut self) -> bool {
        self.editor.delete_backward()
    }

    #[wasm_bindgen(js_name = deleteForward)]
    pub fn delete_forward(&mut self) -> bool {
        self.editor.delete_forward()
    }

    /// Report the host caret/selection as slot offsets; omit both when the
    /// surface has no active range
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, anchor: Option<u32>, head: Option<u32>) {
        let pos = |offset: u32| DocPos(offset as usize);
        let selection = match (anchor, head) {
            (Some(anchor), Some(head)) => Some(Selection::new(pos(anchor), pos(head))),
            (Some(offset), None) | (None, Some(offset)) => Some(Selection::collapsed(pos(offset))),
            (None, None) => None,
        };
        self.editor.set_selection(selection);
    }

    /// Returns true when the host must call `preventDefault`
    #[wasm_bindgen(js_name = handleKeyDown)]
    pub fn handle_key_down(&mut self, key: &str) -> bool {
        self.editor.key_down(Key::from_dom_key(key)).prevent_default()
    }

    /// `target` is `{ kind: "table", value: id }`, `{ kind: "text" }` or
    /// `{ kind: "suggestion", value: index }`
    #[wasm_bindgen(js_name = handleClick)]
    pub fn handle_click(&mut self, target: JsValue) -> Result<(), JsValue> {
        let target: PointerTarget = deserialize(target, "Invalid click target")?;
        self.editor.click(target);
        Ok(())
    }

    /// `pos` is `{ header: col }` or `{ body: [row, col] }`
    #[wasm_bindgen(js_name = editCell)]
    pub fn edit_cell(&mut self, table: u32, pos: JsValue, text: &str) -> Result<bool, JsValue> {
        let pos: CellPos = deserialize(pos, "Invalid cell position")?;
        Ok(self.editor.edit_cell(NodeId(table), pos, text))
    }

    #[wasm_bindgen(js_name = handleFocus)]
    pub fn handle_focus(&mut self) {
        self.editor.focus();
    }

    /// Schedules cleanup; call `tick` after `blurCleanupDelayMs`
    #[wasm_bindgen(js_name = handleBlur)]
    pub fn handle_blur(&mut self, now: Option<f64>) {
        self.editor.blur(now.unwrap_or_else(now_ms));
    }

    #[wasm_bindgen(getter, js_name = blurCleanupDelayMs)]
    pub fn blur_cleanup_delay_ms(&self) -> f64 {
        self.editor.config().blur_cleanup_delay_ms
    }

    /// Run due deferred work; returns whether the view changed
    pub fn tick(&mut self, now: Option<f64>) -> bool {
        self.editor.tick(now.unwrap_or_else(now_ms))
    }

    /// Markup snapshot of the document
    pub fn content(&self) -> String {
        self.editor.content()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.editor.is_empty()
    }

    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.view(), "Serialization error")
    }

    #[wasm_bindgen(js_name = getSegments)]
    pub fn get_segments(&self) -> Result<JsValue, JsValue> {
        serialize(&self.editor.segments(), "Serialization error")
    }

    /// Stop receiving outside clicks (the component is going away)
    pub fn unmount(&mut self) {
        self.editor.unmount();
    }
}

/// Report a pointer-down anywhere on the page. `surface` is the id of the
/// editor it landed in, if any. Returns how many editors were dismissed.
#[wasm_bindgen(js_name = globalPointerDown)]
pub fn global_pointer_down(surface: Option<u32>) -> u32 {
    POINTER_HUB.with(|hub| hub.pointer_down(surface.map(SurfaceId)) as u32)
}

/// Classify clipboard text without an editor: a table object, or null for text
#[wasm_bindgen(js_name = parseClipboard)]
pub fn parse_clipboard_js(text: &str, detect_headers: bool) -> Result<JsValue, JsValue> {
    let detection = if detect_headers {
        HeaderDetection::Heuristic
    } else {
        HeaderDetection::FirstRow
    };

    match parse_clipboard(text, detection) {
        ClipboardContent::Table(table) => serialize(&table, "Serialization error"),
        ClipboardContent::Text(_) => Ok(JsValue::NULL),
    }
}
