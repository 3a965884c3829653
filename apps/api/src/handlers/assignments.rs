use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use folio_core::ActorId;
use folio_domain::Actor;

use crate::dto::{AssignmentListParams, AssignmentRequest, AssignmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_assignments_handler(
    State(state): State<AppState>,
    Extension(_actor): Extension<Actor>,
    Query(params): Query<AssignmentListParams>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let relations = state
        .assignment_service
        .list_relations()
        .await
        .into_iter()
        .filter(|relation| params.matches(relation))
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(relations))
}

pub async fn assign_publisher_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<AssignmentRequest>,
) -> ApiResult<StatusCode> {
    let (editor_id, publisher_id) = parse_pair(payload)?;
    state
        .assignment_service
        .assign(&actor, &editor_id, &publisher_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn unassign_publisher_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<AssignmentRequest>,
) -> ApiResult<StatusCode> {
    let (editor_id, publisher_id) = parse_pair(payload)?;
    state
        .assignment_service
        .unassign(&actor, &editor_id, &publisher_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_pair(payload: AssignmentRequest) -> ApiResult<(ActorId, ActorId)> {
    Ok((
        ActorId::new(payload.editor_id)?,
        ActorId::new(payload.publisher_id)?,
    ))
}
