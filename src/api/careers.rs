//! Careers page copy endpoints.

use axum::extract::State;

use super::{success_with_message, ApiJson, ApiResult};
use crate::models::{CareersPageInfo, UpdateCareersRequest};
use crate::AppState;

/// GET /api/admin/careers - Get the careers page copy, creating defaults on first read.
pub async fn get_careers(State(state): State<AppState>) -> ApiResult<CareersPageInfo> {
    let info = state.repo.get_or_init_careers_page().await?;
    success_with_message(info, "Careers information fetched successfully")
}

/// PUT /api/admin/careers - Replace the careers page copy.
pub async fn update_careers(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateCareersRequest>,
) -> ApiResult<CareersPageInfo> {
    let update = request.validate()?;
    let info = state.repo.upsert_careers_page(&update).await?;

    tracing::info!("Updated careers page copy");
    success_with_message(info, "Careers information updated successfully")
}
