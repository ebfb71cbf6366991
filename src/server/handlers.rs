//! Route handlers.

use super::error::{ApiError, ApiResult, ProxyError};
use super::AppState;
use crate::models::{GenerationRequest, GenerationResponse, ImageProxyParams};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{Html, Response};
use axum::Json;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /image_proxy
///
/// Streams the generated image from upstream with its status and headers,
/// minus the hop-by-hop ones.
pub async fn image_proxy(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let params = ImageProxyParams::from_query_pairs(pairs);
    if params.prompt.is_empty() {
        return Err(ProxyError::MissingPrompt);
    }

    let upstream = state.images.fetch(&params).await?;
    let headers = upstream.forwarded_headers();

    let mut response = Response::new(Body::from_stream(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// POST /generate
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResponse>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let images = state.generator.generate(&request.text).await?;
    Ok(Json(GenerationResponse { images }))
}
