//! Application services and ports.

#![forbid(unsafe_code)]

mod actor_resolver;
mod assignment_service;
mod editing_session;
mod lifecycle_ports;
mod lifecycle_service;

#[cfg(test)]
mod test_fakes;

pub use actor_resolver::{ActorResolver, IdentityConfig};
pub use assignment_service::AssignmentService;
pub use editing_session::EditingSessionService;
pub use lifecycle_ports::{
    AssignmentRepository, AuditEvent, AuditRepository, CreateDocumentInput, DocumentListQuery,
    DocumentRepository, TransitionInput,
};
pub use lifecycle_service::LifecycleService;
