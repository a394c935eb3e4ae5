//! Neighborhood (BAIRRO) handlers, keyed by postal code

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::{require, require_text};
use crate::domain::{DomainError, NeighborhoodUpdate, NewNeighborhood, PostalCode, Resource};
use crate::infrastructure::AppState;

const CREATE_REQUIRED: &str = "CEP, nome do bairro e ID da cidade são obrigatórios";
const UPDATE_REQUIRED: &str = "Nome do bairro e ID da cidade são obrigatórios";

#[derive(Debug, Deserialize)]
pub struct NeighborhoodRequest {
    pub cep: Option<PostalCode>,
    pub nm_bairro: Option<String>,
    pub id_cidade: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/bairros",
    tag = "bairros",
    responses((status = 200, description = "All neighborhoods with city and state names"))
)]
pub async fn list_neighborhoods(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let neighborhoods = state.neighborhood_repo.find_all().await?;
    Ok(Json(neighborhoods))
}

#[utoipa::path(
    get,
    path = "/bairros/{cep}",
    tag = "bairros",
    params(("cep" = String, Path, description = "Postal code")),
    responses(
        (status = 200, description = "Neighborhood found"),
        (status = 400, description = "Malformed postal code"),
        (status = 404, description = "Neighborhood not found")
    )
)]
pub async fn get_neighborhood(
    State(state): State<AppState>,
    PathParam(cep): PathParam<String>,
) -> Result<impl IntoResponse, ApiError> {
    let postal_code: PostalCode = cep.parse()?;
    let neighborhood = state
        .neighborhood_repo
        .find_by_postal_code(postal_code)
        .await?
        .ok_or(DomainError::NotFound(Resource::Neighborhood))?;

    Ok(Json(neighborhood))
}

#[utoipa::path(
    post,
    path = "/bairros",
    tag = "bairros",
    responses(
        (status = 201, description = "Neighborhood created"),
        (status = 400, description = "Missing field, duplicate postal code or unknown city")
    )
)]
pub async fn create_neighborhood(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NeighborhoodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = NewNeighborhood {
        postal_code: require(payload.cep, CREATE_REQUIRED)?,
        name: require_text(payload.nm_bairro, CREATE_REQUIRED)?,
        city_id: require(payload.id_cidade, CREATE_REQUIRED)?,
    };
    let postal_code = input.postal_code;
    state.neighborhood_repo.create(input).await?;
    tracing::info!("Neighborhood {} created", postal_code);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": Resource::Neighborhood.created_message() })),
    ))
}

#[utoipa::path(
    put,
    path = "/bairros/{cep}",
    tag = "bairros",
    params(("cep" = String, Path, description = "Postal code")),
    responses(
        (status = 200, description = "Neighborhood updated"),
        (status = 404, description = "Neighborhood not found")
    )
)]
pub async fn update_neighborhood(
    State(state): State<AppState>,
    PathParam(cep): PathParam<String>,
    JsonBody(payload): JsonBody<NeighborhoodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let postal_code: PostalCode = cep.parse()?;
    let input = NeighborhoodUpdate {
        name: require_text(payload.nm_bairro, UPDATE_REQUIRED)?,
        city_id: require(payload.id_cidade, UPDATE_REQUIRED)?,
    };
    state.neighborhood_repo.update(postal_code, input).await?;

    Ok(Json(
        json!({ "message": Resource::Neighborhood.updated_message() }),
    ))
}

#[utoipa::path(
    delete,
    path = "/bairros/{cep}",
    tag = "bairros",
    params(("cep" = String, Path, description = "Postal code")),
    responses(
        (status = 200, description = "Neighborhood deleted"),
        (status = 404, description = "Neighborhood not found")
    )
)]
pub async fn delete_neighborhood(
    State(state): State<AppState>,
    PathParam(cep): PathParam<String>,
) -> Result<impl IntoResponse, ApiError> {
    let postal_code: PostalCode = cep.parse()?;
    state.neighborhood_repo.delete(postal_code).await?;
    tracing::info!("Neighborhood {} deleted", postal_code);

    Ok(Json(
        json!({ "message": Resource::Neighborhood.deleted_message() }),
    ))
}
