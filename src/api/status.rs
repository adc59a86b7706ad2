//! Service status endpoint.

use axum::extract::State;
use serde::Serialize;

use super::{success_with_message, ApiResult};
use crate::AppState;

/// Which optional settings the running service has picked up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub jwt_secret: &'static str,
    pub image_host: &'static str,
    pub protect_careers: bool,
}

fn loaded(present: bool) -> &'static str {
    if present {
        "Loaded"
    } else {
        "Missing"
    }
}

/// GET /api/status - Report configuration status without revealing values.
pub async fn get_status(State(state): State<AppState>) -> ApiResult<ServiceStatus> {
    let status = ServiceStatus {
        jwt_secret: loaded(state.config.jwt_secret.is_some()),
        image_host: loaded(state.config.cloudinary.is_some()),
        protect_careers: state.config.protect_careers,
    };
    success_with_message(status, "Backend working")
}
