//! City (CIDADE) handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::{require, require_text};
use crate::domain::{CityInput, DomainError, Resource};
use crate::infrastructure::AppState;

const FIELDS_REQUIRED: &str = "Nome da cidade e ID do estado são obrigatórios";

#[derive(Debug, Deserialize)]
pub struct CityRequest {
    pub nm_cidade: Option<String>,
    pub id_estado: Option<i32>,
}

impl CityRequest {
    fn into_input(self) -> Result<CityInput, ApiError> {
        Ok(CityInput {
            name: require_text(self.nm_cidade, FIELDS_REQUIRED)?,
            state_id: require(self.id_estado, FIELDS_REQUIRED)?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/cidades",
    tag = "cidades",
    responses((status = 200, description = "All cities with their state name"))
)]
pub async fn list_cities(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cities = state.city_repo.find_all().await?;
    Ok(Json(cities))
}

#[utoipa::path(
    get,
    path = "/cidades/{id}",
    tag = "cidades",
    params(("id" = i32, Path, description = "City id")),
    responses(
        (status = 200, description = "City found"),
        (status = 404, description = "City not found")
    )
)]
pub async fn get_city(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let city = state
        .city_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound(Resource::City))?;

    Ok(Json(city))
}

#[utoipa::path(
    post,
    path = "/cidades",
    tag = "cidades",
    responses(
        (status = 201, description = "City created"),
        (status = 400, description = "Missing field or unknown state")
    )
)]
pub async fn create_city(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    let id = state.city_repo.create(input).await?;
    tracing::info!("City {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id_cidade": id,
            "message": Resource::City.created_message()
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/cidades/{id}",
    tag = "cidades",
    params(("id" = i32, Path, description = "City id")),
    responses(
        (status = 200, description = "City updated"),
        (status = 404, description = "City not found")
    )
)]
pub async fn update_city(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<CityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    state.city_repo.update(id, input).await?;

    Ok(Json(json!({ "message": Resource::City.updated_message() })))
}

#[utoipa::path(
    delete,
    path = "/cidades/{id}",
    tag = "cidades",
    params(("id" = i32, Path, description = "City id")),
    responses(
        (status = 200, description = "City deleted"),
        (status = 404, description = "City not found")
    )
)]
pub async fn delete_city(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.city_repo.delete(id).await?;
    tracing::info!("City {} deleted", id);

    Ok(Json(json!({ "message": Resource::City.deleted_message() })))
}
