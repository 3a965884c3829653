use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use folio_application::{DocumentListQuery, TransitionInput};
use folio_domain::{Actor, DocumentId, DocumentStatus};

use crate::dto::{
    CreateDocumentRequest, DocumentListParams, DocumentResponse, EditDocumentBodyRequest,
    TransitionDocumentRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_document_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateDocumentRequest>,
) -> ApiResult<(StatusCode, Json<DocumentResponse>)> {
    let document = state
        .lifecycle_service
        .create_document(&actor, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(document))))
}

pub async fn list_documents_handler(
    State(state): State<AppState>,
    Extension(_actor): Extension<Actor>,
    Query(params): Query<DocumentListParams>,
) -> ApiResult<Json<Vec<DocumentResponse>>> {
    let documents = state
        .lifecycle_service
        .list_documents(DocumentListQuery::try_from(params)?)
        .await?
        .into_iter()
        .map(DocumentResponse::from)
        .collect();

    Ok(Json(documents))
}

pub async fn get_document_handler(
    State(state): State<AppState>,
    Extension(_actor): Extension<Actor>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<DocumentResponse>> {
    let document = state
        .lifecycle_service
        .get_document(DocumentId::from_str(&document_id)?)
        .await?;

    Ok(Json(DocumentResponse::from(document)))
}

pub async fn edit_document_body_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(document_id): Path<String>,
    Json(payload): Json<EditDocumentBodyRequest>,
) -> ApiResult<Json<DocumentResponse>> {
    let document = state
        .lifecycle_service
        .edit_body(&actor, DocumentId::from_str(&document_id)?, payload.body)
        .await?;

    Ok(Json(DocumentResponse::from(document)))
}

pub async fn transition_document_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(document_id): Path<String>,
    Json(payload): Json<TransitionDocumentRequest>,
) -> ApiResult<Json<DocumentResponse>> {
    let document = state
        .lifecycle_service
        .transition(
            &actor,
            DocumentId::from_str(&document_id)?,
            TransitionInput::try_from(payload)?,
        )
        .await?;

    if document.status() != DocumentStatus::Draft {
        state
            .editing_session_service
            .close_document(document.id())
            .await;
    }

    Ok(Json(DocumentResponse::from(document)))
}
