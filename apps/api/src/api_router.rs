use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use folio_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/documents",
            get(handlers::documents::list_documents_handler)
                .post(handlers::documents::create_document_handler),
        )
        .route(
            "/api/documents/{document_id}",
            get(handlers::documents::get_document_handler),
        )
        .route(
            "/api/documents/{document_id}/body",
            put(handlers::documents::edit_document_body_handler),
        )
        .route(
            "/api/documents/{document_id}/transitions",
            post(handlers::documents::transition_document_handler),
        )
        .route(
            "/api/documents/{document_id}/suggestion",
            get(handlers::suggestions::peek_suggestion_handler)
                .post(handlers::suggestions::propose_suggestion_handler)
                .delete(handlers::suggestions::dismiss_suggestion_handler),
        )
        .route(
            "/api/documents/{document_id}/suggestion/accept",
            post(handlers::suggestions::accept_suggestion_handler),
        )
        .route(
            "/api/assignments",
            get(handlers::assignments::list_assignments_handler)
                .post(handlers::assignments::assign_publisher_handler)
                .delete(handlers::assignments::unassign_publisher_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_actor,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
