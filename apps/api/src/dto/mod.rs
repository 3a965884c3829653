mod assignments;
mod common;
mod documents;
mod suggestions;

pub use assignments::{AssignmentListParams, AssignmentRequest, AssignmentResponse};
pub use common::HealthResponse;
pub use documents::{
    CreateDocumentRequest, DocumentListParams, DocumentResponse, EditDocumentBodyRequest,
    TransitionDocumentRequest,
};
pub use suggestions::{ProposeSuggestionRequest, ProposeSuggestionResponse, SuggestionResponse};
