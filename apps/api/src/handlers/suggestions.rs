use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use folio_core::AppError;
use folio_domain::{Actor, DocumentId};

use crate::dto::{
    DocumentResponse, ProposeSuggestionRequest, ProposeSuggestionResponse, SuggestionResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn propose_suggestion_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(document_id): Path<String>,
    Json(payload): Json<ProposeSuggestionRequest>,
) -> ApiResult<Json<ProposeSuggestionResponse>> {
    let visible = state
        .editing_session_service
        .propose(&actor, DocumentId::from_str(&document_id)?, payload.into())
        .await?;

    Ok(Json(ProposeSuggestionResponse { visible }))
}

pub async fn peek_suggestion_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<SuggestionResponse>> {
    let document_id = DocumentId::from_str(&document_id)?;
    let suggestion = state
        .editing_session_service
        .peek(&actor, document_id)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no pending suggestion for document '{document_id}'"
            ))
        })?;

    Ok(Json(SuggestionResponse::from(suggestion)))
}

pub async fn dismiss_suggestion_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(document_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .editing_session_service
        .dismiss(&actor, DocumentId::from_str(&document_id)?)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn accept_suggestion_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<DocumentResponse>> {
    let document = state
        .editing_session_service
        .accept(&actor, DocumentId::from_str(&document_id)?)
        .await?;

    Ok(Json(DocumentResponse::from(document)))
}
