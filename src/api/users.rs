//! User (USUARIO) handlers, keyed by login

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::{nullable, require, require_text};
use crate::domain::{DomainError, Login, NewUser, Resource, UserPatch};
use crate::infrastructure::AppState;

const CREATE_REQUIRED: &str = "Login, senha e nome do usuário são obrigatórios";
const NAME_REQUIRED: &str = "Nome do usuário é obrigatório";

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub login: Option<Login>,
    pub senha: Option<String>,
    pub nm_usuario: Option<String>,
    pub email_contato: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub nm_usuario: Option<String>,
    pub senha: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email_contato: Option<Option<String>>,
}

#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "usuarios",
    responses((status = 200, description = "All users; passwords are never returned"))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_repo.find_all().await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/usuarios/{login}",
    tag = "usuarios",
    params(("login" = String, Path, description = "User login")),
    responses(
        (status = 200, description = "User found"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(login): PathParam<String>,
) -> Result<impl IntoResponse, ApiError> {
    let login = Login::parse(login)?;
    let user = state
        .user_repo
        .find_by_login(&login)
        .await?
        .ok_or(DomainError::NotFound(Resource::User))?;

    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "usuarios",
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Missing field or login already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = NewUser {
        login: require(payload.login, CREATE_REQUIRED)?,
        password: require_text(payload.senha, CREATE_REQUIRED)?,
        name: require_text(payload.nm_usuario, CREATE_REQUIRED)?,
        contact_email: payload.email_contato,
    };
    let login = input.login.clone();
    state.user_repo.create(input).await?;
    tracing::info!("User {} created", login);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": Resource::User.created_message() })),
    ))
}

#[utoipa::path(
    put,
    path = "/usuarios/{login}",
    tag = "usuarios",
    params(("login" = String, Path, description = "User login")),
    responses(
        (status = 200, description = "User updated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(login): PathParam<String>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let login = Login::parse(login)?;
    let patch = UserPatch {
        name: require_text(payload.nm_usuario, NAME_REQUIRED)?,
        password: payload.senha.filter(|p| !p.is_empty()),
        contact_email: payload.email_contato,
    };
    state.user_repo.update(&login, patch).await?;

    Ok(Json(json!({ "message": Resource::User.updated_message() })))
}

#[utoipa::path(
    delete,
    path = "/usuarios/{login}",
    tag = "usuarios",
    params(("login" = String, Path, description = "User login")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "User still referenced by a book"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(login): PathParam<String>,
) -> Result<impl IntoResponse, ApiError> {
    let login = Login::parse(login)?;
    state.user_repo.delete(&login).await?;
    tracing::info!("User {} deleted", login);

    Ok(Json(json!({ "message": Resource::User.deleted_message() })))
}
