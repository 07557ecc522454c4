//! Service handlers: search, detail, batch creation and moderation.

use crate::{
    services::{normalize::ServiceInput, ranking::TagKind},
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Comma-separated category ids.
    pub category_id: Option<String>,
    /// Comma-separated eligibility ids.
    pub eligibility_id: Option<String>,
    pub site_id: Option<i64>,
}

/// GET /services - tag search with relevance ranking. Exactly one of
/// `category_id` / `eligibility_id` selects the tag relation.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response> {
    let (kind, raw_ids) = match (&query.category_id, &query.eligibility_id) {
        (Some(ids), None) => (TagKind::Category, ids.as_str()),
        (None, Some(ids)) => (TagKind::Eligibility, ids.as_str()),
        (Some(_), Some(_)) => {
            return Err(Error::InvalidInput(
                "specify either category_id or eligibility_id, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(Error::InvalidInput(
                "category_id or eligibility_id is required".to_string(),
            ))
        }
    };

    let services = state
        .directory
        .search_services(kind, raw_ids, query.site_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "services": services }))).into_response())
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let service = state.directory.service(id).await?;
    Ok((StatusCode::OK, Json(service)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub category_id: i64,
}

pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Response> {
    let services = state.directory.featured_services(query.category_id).await?;
    Ok((StatusCode::OK, Json(json!({ "services": services }))).into_response())
}

pub async fn pending(State(state): State<AppState>) -> Result<Response> {
    let services = state.directory.pending_services().await?;
    Ok((StatusCode::OK, Json(json!({ "services": services }))).into_response())
}

pub async fn count(State(state): State<AppState>) -> Result<Response> {
    let count = state.directory.service_count().await?;
    Ok((StatusCode::OK, Json(count)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CreateServicesRequest {
    pub services: Vec<ServiceInput>,
}

/// POST /resources/:resource_id/services - atomic batch creation.
pub async fn create(
    State(state): State<AppState>,
    Path(resource_id): Path<i64>,
    Json(request): Json<CreateServicesRequest>,
) -> Result<Response> {
    let created = state
        .directory
        .create_services(resource_id, request.services)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "services": created }))).into_response())
}

pub async fn approve(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let service = state.moderation.approve(id).await?;
    Ok((StatusCode::OK, Json(service)).into_response())
}

pub async fn reject(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let service = state.moderation.reject(id).await?;
    Ok((StatusCode::OK, Json(service)).into_response())
}

pub async fn certify(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let service = state.moderation.certify(id).await?;
    Ok((StatusCode::OK, Json(service)).into_response())
}

/// DELETE /services/:id - deactivate an approved service (soft removal).
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let service = state.moderation.deactivate(id).await?;
    Ok((StatusCode::OK, Json(service)).into_response())
}
