use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error::ApiError, ApiState};
use crate::coords::CoordinatePair;
use crate::geocode;
use crate::resolver::ResolutionBody;

#[derive(Debug, Deserialize)]
pub struct UrlParams {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    lat: Option<String>,
    lng: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddressBody {
    address: Option<String>,
}

pub async fn banner() -> &'static str {
    "Chorrillos Seguro backend running"
}

pub async fn resolve_get(
    State(state): State<ApiState>,
    query: Result<Query<UrlParams>, QueryRejection>,
) -> Result<Json<ResolutionBody>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    resolve_in_pool(state, params.url).await
}

pub async fn resolve_post(
    State(state): State<ApiState>,
    payload: Result<Json<UrlParams>, JsonRejection>,
) -> Result<Json<ResolutionBody>, ApiError> {
    let Json(params) = payload.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    resolve_in_pool(state, params.url).await
}

async fn resolve_in_pool(
    state: ApiState,
    url: Option<String>,
) -> Result<Json<ResolutionBody>, ApiError> {
    let url = url
        .filter(|u| !u.trim().is_empty())
        .ok_or(ApiError::MissingUrl)?;

    // libcurl blocks; keep it off the async workers.
    let resolver = state.resolver.clone();
    let resolution = tokio::task::spawn_blocking(move || resolver.resolve(&url))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(ResolutionBody::from(&resolution)))
}

pub async fn reverse_geocode(
    State(state): State<ApiState>,
    query: Result<Query<ReverseParams>, QueryRejection>,
) -> Result<Json<AddressBody>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(ApiError::MissingCoordinates);
    };
    let pair = CoordinatePair::parse_pair(&lat, &lng)?;

    let cfg = state.geocode.clone();
    let address = tokio::task::spawn_blocking(move || geocode::reverse(pair, &cfg))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(AddressBody { address }))
}
