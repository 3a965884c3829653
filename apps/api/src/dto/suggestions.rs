use folio_domain::Suggestion;
use serde::{Deserialize, Serialize};

/// Incoming suggestion from the tracked-change or assistant source.
#[derive(Debug, Deserialize)]
pub struct ProposeSuggestionRequest {
    #[serde(default)]
    pub original_text: String,
    pub suggested_text: String,
    #[serde(default)]
    pub operation_type: String,
    #[serde(default)]
    pub operation_description: String,
}

impl From<ProposeSuggestionRequest> for Suggestion {
    fn from(value: ProposeSuggestionRequest) -> Self {
        Self {
            original_text: value.original_text,
            suggested_text: value.suggested_text,
            operation_type: value.operation_type,
            operation_description: value.operation_description,
        }
    }
}

/// Result of proposing a suggestion.
#[derive(Debug, Serialize)]
pub struct ProposeSuggestionResponse {
    pub visible: bool,
}

/// API representation of the live suggestion.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub original_text: String,
    pub suggested_text: String,
    pub operation_type: String,
    pub operation_description: String,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(value: Suggestion) -> Self {
        Self {
            original_text: value.original_text,
            suggested_text: value.suggested_text,
            operation_type: value.operation_type,
            operation_description: value.operation_description,
        }
    }
}
