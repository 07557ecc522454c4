//! Texting handlers

use crate::{state::AppState, Error, Result};
use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct TextingRequest {
    pub data: TextingData,
}

#[derive(Debug, Deserialize)]
pub struct TextingData {
    pub recipient_name: Option<String>,
    pub phone_number: String,
    pub service_id: i64,
}

/// POST /textings - text a recipient about a service.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<TextingRequest>,
) -> Result<Response> {
    // The route is only mounted when texting is configured.
    let texting = state
        .texting
        .as_ref()
        .ok_or_else(|| Error::Internal("texting service not configured".to_string()))?;

    let data = request.data;
    if data.phone_number.trim().is_empty() {
        return Err(Error::InvalidInput("phone_number must not be blank".to_string()));
    }

    match texting
        .send(data.recipient_name, data.phone_number, data.service_id)
        .await
    {
        Ok(()) => Ok((StatusCode::OK, Json(json!({ "message": "success" }))).into_response()),
        // Provider failures surface as a client-visible failure body, not a 5xx.
        Err(Error::ExternalService(e)) => {
            tracing::warn!(error = %e, "texting provider rejected engagement");
            Ok((StatusCode::BAD_REQUEST, Json(json!({ "error": "failure" }))).into_response())
        }
        Err(other) => Err(other),
    }
}
