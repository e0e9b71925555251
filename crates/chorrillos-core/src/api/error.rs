use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::coords::CoordinateError;
use crate::error::ResolveError;
use crate::geocode::GeocodeError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("URL parameter is required")]
    MissingUrl,

    #[error("Malformed request: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("lat and lng parameters are required")]
    MissingCoordinates,

    #[error(transparent)]
    Coordinates(#[from] CoordinateError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl
            | ApiError::MalformedPayload(_)
            | ApiError::MissingCoordinates
            | ApiError::Coordinates(_) => StatusCode::BAD_REQUEST,
            ApiError::Resolve(ResolveError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Resolve(ResolveError::ResolutionFailed { .. }) | ApiError::Geocode(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            ApiError::MissingUrl | ApiError::MalformedPayload(_) => "Bad request",
            ApiError::Resolve(ResolveError::InvalidInput { .. }) => "Invalid map link",
            ApiError::Resolve(ResolveError::ResolutionFailed { .. }) => "Failed to resolve URL",
            ApiError::MissingCoordinates | ApiError::Coordinates(_) => "Invalid coordinates",
            ApiError::Geocode(_) => "Geocoding failed",
            ApiError::Internal(_) => "Internal error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = json!({ "error": self.summary(), "details": self.to_string() });
        (status, Json(body)).into_response()
    }
}
