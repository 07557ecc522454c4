//! Category handlers

use crate::{api::params::parse_flag, state::AppState, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub site_id: Option<i64>,
    /// Tri-state: absent/empty means no filter.
    pub top_level: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let top_level = parse_flag(query.top_level.as_deref());
    let categories = state
        .directory
        .list_categories(query.site_id, top_level)
        .await?;

    Ok((StatusCode::OK, Json(categories)).into_response())
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let category = state.directory.category(id).await?;
    Ok((StatusCode::OK, Json(category)).into_response())
}

pub async fn children(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let children = state.directory.category_children(id).await?;
    Ok((StatusCode::OK, Json(children)).into_response())
}

pub async fn counts(State(state): State<AppState>) -> Result<Response> {
    let counts = state.directory.category_counts().await?;
    Ok((StatusCode::OK, Json(counts)).into_response())
}

pub async fn featured(State(state): State<AppState>) -> Result<Response> {
    let categories = state.directory.featured_categories().await?;
    Ok((StatusCode::OK, Json(categories)).into_response())
}

pub async fn tree(State(state): State<AppState>) -> Result<Response> {
    let tree = state.directory.category_tree().await?;
    Ok((StatusCode::OK, Json(tree)).into_response())
}
