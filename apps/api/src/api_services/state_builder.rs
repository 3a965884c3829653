use std::sync::Arc;

use folio_application::{
    ActorResolver, AssignmentRepository, AssignmentService, AuditRepository, DocumentRepository,
    EditingSessionService, LifecycleService,
};
use folio_core::AppError;
use folio_domain::WholeDocumentMerge;
use folio_infrastructure::{
    InMemoryAssignmentRepository, InMemoryAuditRepository, InMemoryDocumentRepository,
    PostgresAssignmentRepository, PostgresAuditRepository, PostgresDocumentRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

struct RepositorySet {
    document_repository: Arc<dyn DocumentRepository>,
    assignment_repository: Arc<dyn AssignmentRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

pub async fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let repositories = RepositorySet {
        document_repository: Arc::new(PostgresDocumentRepository::new(pool.clone())),
        assignment_repository: Arc::new(PostgresAssignmentRepository::new(pool.clone())),
        audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
    };

    assemble(repositories, config).await
}

pub async fn build_in_memory_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let repositories = RepositorySet {
        document_repository: Arc::new(InMemoryDocumentRepository::new()),
        assignment_repository: Arc::new(InMemoryAssignmentRepository::new()),
        audit_repository: Arc::new(InMemoryAuditRepository::new()),
    };

    assemble(repositories, config).await
}

async fn assemble(repositories: RepositorySet, config: &ApiConfig) -> Result<AppState, AppError> {
    let assignment_service = AssignmentService::load(
        repositories.assignment_repository,
        repositories.audit_repository.clone(),
    )
    .await?;

    let lifecycle_service = LifecycleService::new(
        repositories.document_repository,
        assignment_service.clone(),
        repositories.audit_repository,
        Arc::new(WholeDocumentMerge),
    );

    Ok(AppState {
        editing_session_service: EditingSessionService::new(lifecycle_service.clone()),
        lifecycle_service,
        assignment_service,
        actor_resolver: ActorResolver::new(config.identity.clone()),
    })
}
