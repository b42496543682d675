//! @mentions: trigger detection and candidate suggestions

pub mod suggest;
pub mod trigger;

pub use suggest::{filter_candidates, MentionSearch, SuggestionEngine, SuggestionList};
pub use trigger::{detect_trigger, PendingMentionTrigger};
