use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;

pub const ACTOR_ID_HEADER: &str = "x-folio-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-folio-actor-role";

pub async fn resolve_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let headers = request.headers();
    let actor = state
        .actor_resolver
        .resolve(
            header_value(headers, ACTOR_ID_HEADER),
            header_value(headers, ACTOR_ROLE_HEADER),
        )
        .inspect_err(|error| {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                error = %error,
                "request actor could not be resolved"
            );
        })?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
