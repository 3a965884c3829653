use folio_domain::AssignmentRelation;
use serde::{Deserialize, Serialize};

/// Incoming payload naming one editor/publisher pair.
#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub editor_id: String,
    pub publisher_id: String,
}

/// Query parameters narrowing the assignment listing.
#[derive(Debug, Default, Deserialize)]
pub struct AssignmentListParams {
    pub editor_id: Option<String>,
    pub publisher_id: Option<String>,
}

impl AssignmentListParams {
    pub fn matches(&self, relation: &AssignmentRelation) -> bool {
        self.editor_id
            .as_deref()
            .is_none_or(|editor_id| relation.editor_id().as_str() == editor_id)
            && self
                .publisher_id
                .as_deref()
                .is_none_or(|publisher_id| relation.publisher_id().as_str() == publisher_id)
    }
}

/// API representation of one assignment.
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub editor_id: String,
    pub publisher_id: String,
}

impl From<AssignmentRelation> for AssignmentResponse {
    fn from(value: AssignmentRelation) -> Self {
        Self {
            editor_id: value.editor_id().to_string(),
            publisher_id: value.publisher_id().to_string(),
        }
    }
}
