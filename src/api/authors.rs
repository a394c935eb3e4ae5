//! Author (AUTOR) handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::require_text;
use crate::domain::{AuthorInput, DomainError, Resource};
use crate::infrastructure::AppState;

const NAME_REQUIRED: &str = "Nome do autor é obrigatório";

#[derive(Debug, Deserialize)]
pub struct AuthorRequest {
    pub nm_autor: Option<String>,
}

impl AuthorRequest {
    fn into_input(self) -> Result<AuthorInput, ApiError> {
        Ok(AuthorInput {
            name: require_text(self.nm_autor, NAME_REQUIRED)?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/autores",
    tag = "autores",
    responses((status = 200, description = "All authors ordered by name"))
)]
pub async fn list_authors(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let authors = state.author_repo.find_all().await?;
    Ok(Json(authors))
}

#[utoipa::path(
    get,
    path = "/autores/{id}",
    tag = "autores",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state
        .author_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Author))?;

    Ok(Json(author))
}

#[utoipa::path(
    post,
    path = "/autores",
    tag = "autores",
    responses(
        (status = 201, description = "Author created"),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AuthorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    let id = state.author_repo.create(input).await?;
    tracing::info!("Author {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id_autor": id,
            "message": Resource::Author.created_message()
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/autores/{id}",
    tag = "autores",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author updated"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<AuthorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_input()?;
    state.author_repo.update(id, input).await?;

    Ok(Json(json!({ "message": Resource::Author.updated_message() })))
}

#[utoipa::path(
    delete,
    path = "/autores/{id}",
    tag = "autores",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted"),
        (status = 400, description = "Author still linked to a book"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.author_repo.delete(id).await?;
    tracing::info!("Author {} deleted", id);

    Ok(Json(json!({ "message": Resource::Author.deleted_message() })))
}
