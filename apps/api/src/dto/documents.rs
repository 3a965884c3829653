mod conversions;
mod types;

pub use types::{
    CreateDocumentRequest, DocumentListParams, DocumentResponse, EditDocumentBodyRequest,
    TransitionDocumentRequest,
};
