//! HTTP surface: `GET /singleton`, `GET /request`, `GET /transient`.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use crate::axum_integration::{create_app_with_di, DiScope};
use crate::controller::{self, IdPair};
use crate::{DiError, ServiceProvider};

/// A resolution failure, reported as `500` with a JSON error body.
#[derive(Debug)]
pub struct ApiError(DiError);

impl From<DiError> for ApiError {
    fn from(err: DiError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        let body = Json(json!({ "error": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

async fn singleton_ids(di: DiScope) -> Result<Json<IdPair>, ApiError> {
    Ok(Json(controller::singleton_pair(di.scope())?))
}

async fn request_ids(di: DiScope) -> Result<Json<IdPair>, ApiError> {
    Ok(Json(controller::request_pair(di.scope())?))
}

async fn transient_ids(di: DiScope) -> Result<Json<IdPair>, ApiError> {
    Ok(Json(controller::transient_pair(di.scope())?))
}

/// Builds the application router around a configured container.
pub fn router(provider: Arc<ServiceProvider>) -> Router {
    create_app_with_di(provider, |router| {
        router
            .route("/singleton", get(singleton_ids))
            .route("/request", get(request_ids))
            .route("/transient", get(transient_ids))
    })
}
