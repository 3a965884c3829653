mod assignments;
mod audit;
mod documents;

pub use assignments::AssignmentRepository;
pub use audit::{AuditEvent, AuditRepository};
pub use documents::{CreateDocumentInput, DocumentListQuery, DocumentRepository, TransitionInput};
