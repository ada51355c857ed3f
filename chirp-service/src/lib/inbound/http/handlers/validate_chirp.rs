use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::chirp::models::ChirpBody;

/// Check a chirp body without storing it.
pub async fn validate_chirp(
    body: Result<Json<ValidateChirpRequest>, JsonRejection>,
) -> Result<ApiSuccess<ValidateChirpResponseData>, ApiError> {
    let Json(body) = body?;

    let cleaned_body = ChirpBody::clean(&body.body.unwrap_or_default())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateChirpResponseData { cleaned_body },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateChirpRequest {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateChirpResponseData {
    pub cleaned_body: String,
}
