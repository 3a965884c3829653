//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_assignment_repository;
mod in_memory_audit_repository;
mod in_memory_document_repository;
mod postgres_assignment_repository;
mod postgres_audit_repository;
mod postgres_document_repository;

pub use in_memory_assignment_repository::InMemoryAssignmentRepository;
pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use postgres_assignment_repository::PostgresAssignmentRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
