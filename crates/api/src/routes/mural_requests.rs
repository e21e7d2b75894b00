//! `muralRequests` procedures.

use axum::{Json, extract::State};
use tracing::instrument;

use scalebreakers_core::MuralRequestId;

use super::CreatedResponse;
use super::extract::ApiJson;
use crate::error::{ApiError, Result};
use crate::models::SubmitMuralRequestInput;
use crate::state::AppState;

/// `muralRequests.submit`: public commission request form.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubmitMuralRequestInput>,
) -> Result<Json<CreatedResponse<MuralRequestId>>> {
    let request = input.validate()?;
    let id = MuralRequestId::generate();

    state
        .store()
        .create_mural_request(id, &request)
        .await
        .map_err(|e| ApiError::internal("Failed to submit mural request", e))?;

    tracing::info!(mural_request_id = %id, "Mural request submitted");
    Ok(Json(CreatedResponse::new(id)))
}
