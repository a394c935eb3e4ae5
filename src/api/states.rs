//! State (ESTADO) handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::require_text;
use crate::domain::{DomainError, Resource, StateInput};
use crate::infrastructure::AppState;

const NAME_REQUIRED: &str = "Nome do estado é obrigatório";

#[derive(Debug, Deserialize)]
pub struct StateRequest {
    pub nm_estado: Option<String>,
}

impl StateRequest {
    fn into_input(self) -> Result<StateInput, ApiError> {
        Ok(StateInput {
            name: require_text(self.nm_estado, NAME_REQUIRED)?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/estados",
    tag = "estados",
    responses((status = 200, description = "All states ordered by name"))
)]
pub async fn list_states(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let states = state.state_repo.find_all().await?;
    Ok(Json(states))
}

#[utoipa::path(
    get,
    path = "/estados/{id}",
    tag = "estados",
    params(("id" = i32, Path, description = "State id")),
    responses(
        (status = 200, description = "State found"),
        (status = 404, description = "State not found")
    )
)]
pub async fn get_state(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let found = state
        .state_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound(Resource::State))?;

    Ok(Json(found))
}

#[utoipa::path(
    post,
    path = "/estados",
    tag = "estados",
    responses(
        (status = 201, description = "State created"),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_state(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<StateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    let id = state.state_repo.create(input).await?;
    tracing::info!("State {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id_estado": id,
            "message": Resource::State.created_message()
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/estados/{id}",
    tag = "estados",
    params(("id" = i32, Path, description = "State id")),
    responses(
        (status = 200, description = "State updated"),
        (status = 404, description = "State not found")
    )
)]
pub async fn update_state(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<StateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    state.state_repo.update(id, input).await?;

    Ok(Json(json!({ "message": Resource::State.updated_message() })))
}

#[utoipa::path(
    delete,
    path = "/estados/{id}",
    tag = "estados",
    params(("id" = i32, Path, description = "State id")),
    responses(
        (status = 200, description = "State deleted"),
        (status = 400, description = "State still referenced by a city"),
        (status = 404, description = "State not found")
    )
)]
pub async fn delete_state(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.state_repo.delete(id).await?;
    tracing::info!("State {} deleted", id);

    Ok(Json(json!({ "message": Resource::State.deleted_message() })))
}
