//! The `/v1/fragments` routes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use frag_core::{ConvertOutcome, Fragment, FragmentDraft, FragmentListing};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::Owner;
use crate::response::success;
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    expand: Option<String>,
}

/// `POST /v1/fragments`: create a fragment from the raw body and the
/// `Content-Type` header, then attach the payload.
pub async fn create_fragment(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("Content-Type header is required"))?;
    if !frag_core::is_supported_type(content_type) {
        return Err(ApiError::unsupported(format!(
            "Unsupported media type: {content_type}"
        )));
    }

    let mut fragment = Fragment::build(
        Arc::clone(&state.store),
        FragmentDraft::new(owner, content_type),
    )?;
    fragment.set_data(body).await?;
    debug!(id = fragment.id(), size = fragment.size(), "created fragment");

    let location = format!("{}/v1/fragments/{}", state.api_url, fragment.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        success(json!({ "fragment": fragment.record() })),
    )
        .into_response())
}

/// `GET /v1/fragments[?expand=1]`: the owner's fragment ids, or full
/// metadata when expanded.
pub async fn list_fragments(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let expand = params.expand.as_deref() == Some("1");
    let fragments = match Fragment::by_user(&state.store, &owner, expand).await? {
        FragmentListing::Ids(ids) => json!(ids),
        FragmentListing::Expanded(fragments) => {
            json!(fragments
                .iter()
                .map(|fragment| fragment.record())
                .collect::<Vec<_>>())
        }
    };
    Ok(success(json!({ "fragments": fragments })))
}

/// `GET /v1/fragments/{id}`: raw payload bytes, or the converted payload
/// when the id carries an extension (`{id}.html`).
pub async fn get_fragment(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let (id, extension) = split_extension(&raw_id);
    debug!(owner = %owner, id, extension, "fetching fragment");

    let fragment = Fragment::by_id(&state.store, &owner, id)
        .await?
        .ok_or_else(|| ApiError::not_found("No fragment with this id"))?;
    let data = fragment.get_data().await?.unwrap_or_default();

    let Some(extension) = extension else {
        return Ok((
            [(header::CONTENT_TYPE, fragment.content_type())],
            data,
        )
            .into_response());
    };

    match fragment.convert_to(&data, extension)? {
        ConvertOutcome::Converted { data, content_type } => Ok((
            [(header::CONTENT_TYPE, content_type.as_mime())],
            data,
        )
            .into_response()),
        ConvertOutcome::Unsupported => Err(ApiError::unsupported(
            "Fragment cannot be converted to this type or the extension is invalid",
        )),
    }
}

/// `GET /v1/fragments/{id}/info`: metadata only.
pub async fn get_fragment_info(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let fragment = Fragment::by_id(&state.store, &owner, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("No fragment with this id"))?;
    Ok(success(json!({ "fragment": fragment.record() })))
}

/// `DELETE /v1/fragments/{id}`: remove metadata and payload.
pub async fn delete_fragment(
    State(state): State<AppState>,
    Extension(Owner(owner)): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Fragment::delete(&state.store, &owner, &id).await?;
    Ok(success(json!({})))
}

/// Split `abc.def.html` into the id before the first dot and the last
/// dot-suffix: `("abc", Some(".html"))`. No dot means no conversion request.
fn split_extension(raw: &str) -> (&str, Option<&str>) {
    let Some((id, _)) = raw.split_once('.') else {
        return (raw, None);
    };
    (id, raw.rfind('.').map(|position| &raw[position..]))
}
