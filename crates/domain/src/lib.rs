//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod actor;
mod assignment;
mod document;
mod lifecycle;
mod merge;
mod role;
mod security;
mod suggestion;

pub use actor::Actor;
pub use assignment::{AssignmentRegistry, AssignmentRelation};
pub use document::{Document, DocumentId, DocumentKind, DocumentParts, DocumentStatus};
pub use lifecycle::{DocumentLifecycle, LifecycleCommand, LifecycleTransition, ensure_editable};
pub use merge::{ChangeMergeEngine, WholeDocumentMerge, paragraph_count, render_block_markup};
pub use role::Role;
pub use security::AuditAction;
pub use suggestion::{Suggestion, SuggestionQueue};
