use serde::{Deserialize, Serialize};

/// Proposed replacement text awaiting acceptance or dismissal.
///
/// Tracked changes and assistant output share this shape; the engine does not
/// distinguish between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text the suggestion was computed against.
    pub original_text: String,
    /// Proposed replacement text, paragraphs separated by blank lines.
    pub suggested_text: String,
    /// Free-form classification such as `grammar` or `tracked-insertion`.
    pub operation_type: String,
    /// Human-readable description of the change.
    pub operation_description: String,
}

impl Suggestion {
    /// Returns whether the proposed text carries any content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.suggested_text.trim().is_empty()
    }
}

/// Holds at most one live suggestion for an editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionQueue {
    current: Option<Suggestion>,
    visible: bool,
}

impl SuggestionQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `suggestion` the live suggestion, replacing any previous one.
    ///
    /// Blank suggestions are ignored. Returns whether the queue changed.
    pub fn propose(&mut self, suggestion: Suggestion) -> bool {
        if suggestion.is_blank() {
            return false;
        }

        self.current = Some(suggestion);
        self.visible = true;
        true
    }

    /// Discards the live suggestion without touching any document.
    pub fn dismiss(&mut self) {
        self.current = None;
        self.visible = false;
    }

    /// Returns the live suggestion, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&Suggestion> {
        self.current.as_ref()
    }

    /// Returns whether a suggestion is currently shown to the user.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
