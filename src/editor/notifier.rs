//! Content-change notification and placeholder tracking

use crate::models::document::is_blank;
use crate::models::Segment;
use crate::renderers::markup::to_markup;

/// Receives the markup snapshot after each mutation
pub type ContentListener = Box<dyn FnMut(&str)>;

/// Calls the listener synchronously, once per mutation
#[derive(Default)]
pub struct ContentNotifier {
    listener: Option<ContentListener>,
    sent: usize,
}

impl ContentNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_listener(&mut self, listener: Option<ContentListener>) {
        self.listener = listener;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Serialize and deliver a snapshot. Nothing is serialized without a listener.
    pub fn notify(&mut self, segments: &[Segment]) {
        if let Some(listener) = self.listener.as_mut() {
            let snapshot = to_markup(segments);
            listener(&snapshot);
            self.sent += 1;
        }
    }

    /// Number of snapshots delivered so far
    pub fn sent(&self) -> usize {
        self.sent
    }
}

/// Placeholder text and whether it currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub text: String,
    visible: bool,
}

impl Placeholder {
    /// A fresh surface is empty, so the placeholder starts visible
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show iff the document is blank
    pub fn recompute(&mut self, segments: &[Segment]) {
        self.visible = is_blank(segments);
    }

    /// Focus hides the placeholder until the next recompute
    pub fn hide(&mut self) {
        self.visible = false;
    }
}
