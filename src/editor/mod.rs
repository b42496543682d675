//! Rich text editor component
//!
//! `RichTextEditor` owns the document buffer and the ephemeral interaction
//! state (selected table, pending mention trigger, suggestion list) and turns
//! host events into document mutations. Every mutation goes through `range`
//! and is followed by exactly one content notification.
//!
//! Failures never escape the event methods: a missing caret, a stale mention
//! anchor or an unknown node degrade to a logged no-op.
//!
//! ## Modules
//!
//! - `range`: structural mutations against a `RangeBuffer`
//! - `notifier`: content listener and placeholder state
//! - `keys`: DOM key mapping
//! - `timer`: cancellable blur cleanup
//! - `pointer`: page-wide outside-click dispatch

pub mod keys;
pub mod notifier;
pub mod pointer;
pub mod range;
pub mod timer;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

pub use keys::{Key, KeyOutcome};
pub use notifier::{ContentListener, ContentNotifier, Placeholder};
pub use pointer::{PointerHub, Subscription, SurfaceId};
pub use timer::CancellableTimer;

use crate::error::Result;
use crate::mentions::{
    detect_trigger, MentionSearch, PendingMentionTrigger, SuggestionEngine, SuggestionList,
};
use crate::models::{CellPos, EditorConfig, MentionCandidate, NodeId, Segment, DEFAULT_DIRECTORY};
use crate::parse::{parse_clipboard, ClipboardContent};
use crate::renderers::{build_editor_view, to_markup, EditorView};
use crate::text::{DocPos, RangeBuffer, SegmentBuffer, Selection};

/// Where a pointer click landed inside the surface
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PointerTarget {
    /// Anywhere on an embedded table, cells included
    Table(NodeId),
    /// Free text or empty surface area
    Text,
    /// An entry of the mention dropdown, by index
    Suggestion(usize),
}

/// Selection and mention state that lives only while the user interacts
#[derive(Debug, Default)]
pub struct Interaction {
    pub selected_table: Option<NodeId>,
    pub trigger: Option<PendingMentionTrigger>,
    pub suggestions: SuggestionList,
}

impl Interaction {
    pub fn suggestions_open(&self) -> bool {
        self.trigger.is_some() && !self.suggestions.is_empty()
    }

    pub fn hide_suggestions(&mut self) {
        self.trigger = None;
        self.suggestions.clear();
    }

    /// Outside click / blur: drop table selection and suggestions
    pub fn dismiss(&mut self) {
        self.selected_table = None;
        self.hide_suggestions();
    }
}

pub struct RichTextEditor<B: RangeBuffer = SegmentBuffer> {
    buffer: B,
    config: EditorConfig,
    engine: SuggestionEngine,
    interaction: Rc<RefCell<Interaction>>,
    notifier: ContentNotifier,
    placeholder: Placeholder,
    blur_cleanup: CancellableTimer,
    focused: bool,
    surface: SurfaceId,
    subscription: Option<Subscription>,
}

impl RichTextEditor<SegmentBuffer> {
    /// Editor over an empty document with the caret at its start
    pub fn new(config: EditorConfig) -> Result<Self> {
        let mut buffer = SegmentBuffer::new();
        buffer.set_selection(Some(Selection::collapsed(DocPos::zero())));
        Self::with_buffer(buffer, config)
    }
}

impl<B: RangeBuffer> RichTextEditor<B> {
    pub fn with_buffer(buffer: B, config: EditorConfig) -> Result<Self> {
        config.validate()?;

        let directory = config
            .mentions
            .clone()
            .unwrap_or_else(|| DEFAULT_DIRECTORY.to_vec());
        let mut placeholder = Placeholder::new(config.placeholder.clone());
        placeholder.recompute(buffer.segments());

        Ok(Self {
            buffer,
            engine: SuggestionEngine::new(directory),
            interaction: Rc::new(RefCell::new(Interaction::default())),
            notifier: ContentNotifier::new(),
            placeholder,
            blur_cleanup: CancellableTimer::new(),
            focused: false,
            surface: SurfaceId::next(),
            subscription: None,
            config,
        })
    }

    // ------------------------------------------------------------------
    // Embedding
    // ------------------------------------------------------------------

    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.notifier.set_listener(Some(Box::new(listener)));
    }

    pub fn clear_on_change(&mut self) {
        self.notifier.set_listener(None);
    }

    /// External candidate lookup; replaces the directory while installed
    pub fn set_mention_search(&mut self, search: Option<Box<dyn MentionSearch>>) {
        self.engine.set_search(search);
    }

    /// Register for outside clicks on the page
    pub fn mount(&mut self, hub: &PointerHub) {
        let interaction: Weak<RefCell<Interaction>> = Rc::downgrade(&self.interaction);
        let surface = self.surface;
        self.subscription = Some(hub.subscribe(surface, move || {
            if let Some(interaction) = interaction.upgrade() {
                log::debug!("pointer down outside surface {:?}", surface);
                interaction.borrow_mut().dismiss();
            }
        }));
    }

    pub fn unmount(&mut self) {
        self.subscription = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    // ------------------------------------------------------------------
    // Input events
    // ------------------------------------------------------------------

    /// Handle a paste. The host must always suppress its own paste.
    ///
    /// Returns whether the document changed.
    pub fn paste(&mut self, text: &str) -> bool {
        if self.is_noop_insert(text) {
            return false;
        }

        let result = match parse_clipboard(text, self.config.header_detection) {
            ClipboardContent::Table(table) => {
                log::debug!(
                    "paste: table {}x{}",
                    table.row_count() + 1,
                    table.column_count()
                );
                range::paste_table(&mut self.buffer, table).map(|_| ())
            }
            ClipboardContent::Text(text) => {
                log::debug!("paste: {} chars of text", text.chars().count());
                range::replace_selection_with_text(&mut self.buffer, &text).map(|_| ())
            }
        };

        self.finish_edit("paste", result)
    }

    /// Text typed by the user (the host's default character insertion)
    pub fn input_text(&mut self, text: &str) -> bool {
        if self.is_noop_insert(text) {
            return false;
        }

        let result = range::replace_selection_with_text(&mut self.buffer, text).map(|_| ());
        self.finish_edit("input", result)
    }

    /// Host default for Backspace when no table is selected
    pub fn delete_backward(&mut self) -> bool {
        match range::delete_backward(&mut self.buffer) {
            Ok(true) => self.finish_edit("delete backward", Ok(())),
            Ok(false) => false,
            Err(e) => self.finish_edit("delete backward", Err(e)),
        }
    }

    /// Host default for Delete when no table is selected
    pub fn delete_forward(&mut self) -> bool {
        match range::delete_forward(&mut self.buffer) {
            Ok(true) => self.finish_edit("delete forward", Ok(())),
            Ok(false) => false,
            Err(e) => self.finish_edit("delete forward", Err(e)),
        }
    }

    /// Caret or selection moved (or was lost)
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.buffer.set_selection(selection);
        self.drop_stale_trigger();
    }

    pub fn key_down(&mut self, key: Key) -> KeyOutcome {
        if self.interaction.borrow().suggestions_open() {
            match key {
                Key::ArrowDown => {
                    self.interaction.borrow_mut().suggestions.move_next();
                    return KeyOutcome::Handled;
                }
                Key::ArrowUp => {
                    self.interaction.borrow_mut().suggestions.move_previous();
                    return KeyOutcome::Handled;
                }
                Key::Enter | Key::Tab => {
                    let candidate = self.interaction.borrow().suggestions.highlighted().cloned();
                    if let Some(candidate) = candidate {
                        self.commit_candidate(candidate);
                    }
                    return KeyOutcome::Handled;
                }
                Key::Escape => {
                    self.interaction.borrow_mut().hide_suggestions();
                    return KeyOutcome::Handled;
                }
                _ => {}
            }
        }

        let selected = self.interaction.borrow().selected_table;

        if key.is_deletion() {
            if let Some(id) = selected {
                let result = range::delete_node(&mut self.buffer, id).map(|_| ());
                self.interaction.borrow_mut().selected_table = None;
                self.finish_structural("delete table", result);
                return KeyOutcome::Handled;
            }
        }

        if let Key::Character(_) = key {
            if selected.is_some() {
                self.interaction.borrow_mut().selected_table = None;
            }
            return KeyOutcome::Default;
        }

        if key == Key::Enter {
            self.interaction.borrow_mut().hide_suggestions();
            let result = range::insert_line_break(&mut self.buffer).map(|_| ());
            self.finish_structural("line break", result);
            return KeyOutcome::Handled;
        }

        KeyOutcome::Default
    }

    pub fn click(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::Table(id) => {
                if self.buffer.node_span(id).is_some() {
                    self.interaction.borrow_mut().selected_table = Some(id);
                } else {
                    log::warn!("click on unknown table {}", id);
                }
            }
            PointerTarget::Text => {
                self.interaction.borrow_mut().dismiss();
            }
            PointerTarget::Suggestion(index) => {
                self.blur_cleanup.cancel();
                let candidate = self.interaction.borrow().suggestions.get(index).cloned();
                match candidate {
                    Some(candidate) => {
                        self.commit_candidate(candidate);
                    }
                    None => log::warn!("click on missing suggestion {}", index),
                }
            }
        }
    }

    /// In-place edit of one table cell
    pub fn edit_cell(&mut self, table: NodeId, pos: CellPos, text: &str) -> bool {
        let result = range::edit_cell(&mut self.buffer, table, pos, text);
        self.finish_structural("cell edit", result)
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.placeholder.hide();
    }

    /// Schedule blur cleanup; it runs from `tick` once the delay has passed
    pub fn blur(&mut self, now_ms: f64) {
        self.focused = false;
        self.blur_cleanup.schedule(now_ms, self.config.blur_cleanup_delay_ms);
    }

    /// Run deferred work that is due. Returns whether blur cleanup ran.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.blur_cleanup.fire_if_due(now_ms) {
            return false;
        }
        self.placeholder.recompute(self.buffer.segments());
        self.interaction.borrow_mut().dismiss();
        true
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    pub fn segments(&self) -> &[Segment] {
        self.buffer.segments()
    }

    /// Markup snapshot of the current content
    pub fn content(&self) -> String {
        to_markup(self.buffer.segments())
    }

    pub fn is_empty(&self) -> bool {
        crate::models::document::is_blank(self.buffer.segments())
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder.is_visible()
    }

    pub fn selected_table(&self) -> Option<NodeId> {
        self.interaction.borrow().selected_table
    }

    pub fn pending_trigger(&self) -> Option<PendingMentionTrigger> {
        self.interaction.borrow().trigger.clone()
    }

    pub fn suggestions_open(&self) -> bool {
        self.interaction.borrow().suggestions_open()
    }

    pub fn suggestions(&self) -> Vec<MentionCandidate> {
        self.interaction.borrow().suggestions.items().to_vec()
    }

    pub fn highlighted_suggestion(&self) -> Option<MentionCandidate> {
        self.interaction.borrow().suggestions.highlighted().cloned()
    }

    pub fn blur_cleanup_pending(&self) -> bool {
        self.blur_cleanup.is_pending()
    }

    pub fn notifications_sent(&self) -> usize {
        self.notifier.sent()
    }

    pub fn view(&self) -> EditorView {
        let interaction = self.interaction.borrow();
        build_editor_view(
            self.buffer.segments(),
            &self.config,
            self.placeholder.is_visible(),
            interaction.selected_table,
            interaction.trigger.as_ref(),
            &interaction.suggestions,
        )
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Replace the pending "@query" with the candidate's token
    fn commit_candidate(&mut self, candidate: MentionCandidate) -> bool {
        let trigger = {
            let mut interaction = self.interaction.borrow_mut();
            let trigger = interaction.trigger.take();
            interaction.hide_suggestions();
            trigger
        };

        let Some(trigger) = trigger else {
            log::debug!("mention commit without a pending trigger");
            return false;
        };

        log::debug!("commit mention {} for @{}", candidate.id, trigger.query);
        let result = range::commit_mention(&mut self.buffer, &trigger, candidate.to_mention());
        self.finish_structural("mention", result.map(|_| ()))
    }

    /// Text-level edit: refresh the trigger, then notify
    fn finish_edit(&mut self, what: &str, result: Result<()>) -> bool {
        if let Err(e) = result {
            log::warn!("{} ignored: {}", what, e);
            return false;
        }
        self.refresh_trigger();
        self.after_mutation();
        true
    }

    /// Structural edit: notify without re-detecting a trigger
    fn finish_structural(&mut self, what: &str, result: Result<()>) -> bool {
        if let Err(e) = result {
            log::warn!("{} ignored: {}", what, e);
            return false;
        }
        self.after_mutation();
        true
    }

    fn refresh_trigger(&mut self) {
        match detect_trigger(&self.buffer) {
            Some(trigger) => {
                let candidates = self.engine.candidates_for(&trigger.query);
                let mut interaction = self.interaction.borrow_mut();
                interaction.suggestions.update(candidates);
                interaction.trigger = Some(trigger);
            }
            None => self.interaction.borrow_mut().hide_suggestions(),
        }
    }

    /// Empty text over a collapsed caret changes nothing
    fn is_noop_insert(&self, text: &str) -> bool {
        text.is_empty() && self.buffer.selection().map_or(true, |s| s.is_collapsed())
    }

    /// Hide suggestions once the caret has left the anchor's end or the
    /// anchor no longer covers "@query"
    fn drop_stale_trigger(&mut self) {
        let caret = self.buffer.selection().filter(Selection::is_collapsed).map(|s| s.head);
        let mut interaction = self.interaction.borrow_mut();
        let stale = interaction.trigger.as_ref().is_some_and(|trigger| {
            caret != Some(trigger.anchor.end) || !trigger.is_valid_in(&self.buffer)
        });
        if stale {
            log::debug!("mention trigger no longer matches the caret");
            interaction.hide_suggestions();
        }
    }

    fn after_mutation(&mut self) {
        self.drop_stale_trigger();
        {
            let mut interaction = self.interaction.borrow_mut();
            if let Some(id) = interaction.selected_table {
                if self.buffer.node_span(id).is_none() {
                    interaction.selected_table = None;
                }
            }
        }
        self.placeholder.recompute(self.buffer.segments());
        self.notifier.notify(self.buffer.segments());
    }
}
