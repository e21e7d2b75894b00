//! `workshops` procedures. Read-only.

use axum::{Json, extract::State};
use tracing::instrument;

use scalebreakers_core::WorkshopId;

use super::extract::{ApiQuery, IdParams, parse_id};
use crate::error::{ApiError, Result};
use crate::models::Workshop;
use crate::state::AppState;

const NOT_FOUND: &str = "Workshop not found";

/// `workshops.list`
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Workshop>>> {
    let workshops = state
        .store()
        .list_workshops()
        .await
        .map_err(|e| ApiError::internal("Failed to load workshops", e))?;
    Ok(Json(workshops))
}

/// `workshops.getById`
#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdParams>,
) -> Result<Json<Workshop>> {
    let id: WorkshopId = parse_id(&params.id, NOT_FOUND)?;
    state
        .store()
        .get_workshop(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load workshop", e))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))
}
