//! Category (CATEGORIA) handlers. Images travel as base64 text.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::{require, require_text};
use crate::domain::{CategoryPatch, DomainError, NewCategory, Resource};
use crate::infrastructure::AppState;
use crate::utils::image;

const CREATE_REQUIRED: &str = "Nome da categoria e imagem são obrigatórios";
const NAME_REQUIRED: &str = "Nome da categoria é obrigatório";

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub nm_categoria: Option<String>,
    pub img_categoria: Option<String>,
}

#[utoipa::path(
    get,
    path = "/categorias",
    tag = "categorias",
    responses((status = 200, description = "All categories, without images"))
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.category_repo.find_all().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category with its base64 image"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .category_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Category))?;

    Ok(Json(category))
}

#[utoipa::path(
    post,
    path = "/categorias",
    tag = "categorias",
    responses(
        (status = 201, description = "Category created"),
        (status = 400, description = "Missing field or image is not base64")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_text(payload.nm_categoria, CREATE_REQUIRED)?;
    let encoded = require(payload.img_categoria, CREATE_REQUIRED)?;
    let input = NewCategory {
        name,
        image: image::decode(&encoded)?,
    };
    let id = state.category_repo.create(input).await?;
    tracing::info!("Category {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id_categoria": id,
            "message": Resource::Category.created_message()
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = CategoryPatch {
        name: require_text(payload.nm_categoria, NAME_REQUIRED)?,
        image: payload
            .img_categoria
            .as_deref()
            .map(image::decode)
            .transpose()?,
    };
    state.category_repo.update(id, patch).await?;

    Ok(Json(json!({ "message": Resource::Category.updated_message() })))
}

#[utoipa::path(
    delete,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, description = "Category still linked to a book"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.category_repo.delete(id).await?;
    tracing::info!("Category {} deleted", id);

    Ok(Json(json!({ "message": Resource::Category.deleted_message() })))
}
