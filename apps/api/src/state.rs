use folio_application::{
    ActorResolver, AssignmentService, EditingSessionService, LifecycleService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle_service: LifecycleService,
    pub assignment_service: AssignmentService,
    pub editing_session_service: EditingSessionService,
    pub actor_resolver: ActorResolver,
}
