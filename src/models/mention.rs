//! Mention tokens and the candidate directory they are picked from

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Avatar shown for candidates that do not carry one
pub const DEFAULT_AVATAR: &str = "👤";

/// An inserted mention token. Immutable once in the document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: String,
    pub display_name: String,
}

/// A directory entry offered by the suggestion dropdown
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MentionCandidate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl MentionCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            avatar: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Case-insensitive substring match on name or email.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self
                .email
                .as_ref()
                .is_some_and(|email| email.to_lowercase().contains(query_lower))
    }

    /// The token that replaces "@query" when this candidate is committed
    pub fn to_mention(&self) -> Mention {
        Mention {
            id: self.id.clone(),
            display_name: self.name.clone(),
        }
    }
}

/// Directory used when the embedder supplies neither a list nor a search function
pub static DEFAULT_DIRECTORY: Lazy<Vec<MentionCandidate>> = Lazy::new(|| {
    vec![
        MentionCandidate::new("1", "John Doe").with_email("john@example.com").with_avatar("👨‍💼"),
        MentionCandidate::new("2", "Jane Smith").with_email("jane@example.com").with_avatar("👩‍💼"),
        MentionCandidate::new("3", "Bob Johnson").with_email("bob@example.com").with_avatar("👨‍🔧"),
        MentionCandidate::new("4", "Alice Brown").with_email("alice@example.com").with_avatar("👩‍🎨"),
        MentionCandidate::new("5", "Charlie Wilson").with_email("charlie@example.com").with_avatar("👨‍🏫"),
        MentionCandidate::new("6", "Diana Prince").with_email("diana@example.com").with_avatar("👩‍⚕️"),
    ]
});
