//! Book (LIVRO) handlers, including the author and category associations

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, JsonBody, PathParam};
use super::wire::{optional_flag, require, require_text};
use crate::domain::{BookPatch, DomainError, Login, NewBook, PostalCode, Resource};
use crate::infrastructure::AppState;
use crate::utils::image;

const BODY_REQUIRED: &str = "Dados são obrigatórios";

/// Every book field; optional at the wire level so create can report
/// which one is missing and update can apply only the present ones.
#[derive(Debug, Default, Deserialize)]
pub struct BookRequest {
    pub nm_livro: Option<String>,
    pub preco: Option<f64>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub pagamento_eletronico: Option<bool>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub pagamento_dinheiro: Option<bool>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub entrega_presencial: Option<bool>,
    #[serde(default, deserialize_with = "optional_flag")]
    pub entrega_delivery: Option<bool>,
    pub img_livro: Option<String>,
    pub cep: Option<PostalCode>,
    pub login_comprador: Option<Login>,
    pub login_vendedor: Option<Login>,
    pub autores: Option<Vec<i32>>,
    pub categorias: Option<Vec<i32>>,
}

fn missing(field: &str) -> String {
    format!("{} é obrigatório", field)
}

impl BookRequest {
    fn into_new_book(self) -> Result<NewBook, DomainError> {
        let name = require_text(self.nm_livro, &missing("nm_livro"))?;
        let price = require(self.preco, &missing("preco"))?;
        let electronic_payment =
            require(self.pagamento_eletronico, &missing("pagamento_eletronico"))?;
        let cash_payment = require(self.pagamento_dinheiro, &missing("pagamento_dinheiro"))?;
        let pickup_delivery = require(self.entrega_presencial, &missing("entrega_presencial"))?;
        let shipping_delivery = require(self.entrega_delivery, &missing("entrega_delivery"))?;
        let encoded = require(self.img_livro, &missing("img_livro"))?;
        let postal_code = require(self.cep, &missing("cep"))?;
        let buyer_login = require(self.login_comprador, &missing("login_comprador"))?;
        let seller_login = require(self.login_vendedor, &missing("login_vendedor"))?;

        Ok(NewBook {
            name,
            price,
            electronic_payment,
            cash_payment,
            pickup_delivery,
            shipping_delivery,
            image: image::decode(&encoded)?,
            postal_code,
            buyer_login,
            seller_login,
            author_ids: self.autores.unwrap_or_default(),
            category_ids: self.categorias.unwrap_or_default(),
        })
    }

    fn into_patch(self) -> Result<BookPatch, DomainError> {
        let name = self
            .nm_livro
            .map(|name| require_text(Some(name), &missing("nm_livro")))
            .transpose()?;

        let patch = BookPatch {
            name,
            price: self.preco,
            electronic_payment: self.pagamento_eletronico,
            cash_payment: self.pagamento_dinheiro,
            pickup_delivery: self.entrega_presencial,
            shipping_delivery: self.entrega_delivery,
            image: self.img_livro.as_deref().map(image::decode).transpose()?,
            postal_code: self.cep,
            buyer_login: self.login_comprador,
            seller_login: self.login_vendedor,
            author_ids: self.autores,
            category_ids: self.categorias,
        };

        if patch.is_empty() {
            return Err(DomainError::Validation(BODY_REQUIRED.to_string()));
        }
        Ok(patch)
    }
}

#[utoipa::path(
    get,
    path = "/livros",
    tag = "livros",
    responses((status = 200, description = "All books with location names, without images"))
)]
pub async fn list_books(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let books = state.book_repo.find_all().await?;
    Ok(Json(books))
}

#[utoipa::path(
    get,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book with image, authors and categories"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound(Resource::Book))?;

    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/livros",
    tag = "livros",
    responses(
        (status = 201, description = "Book created with its associations"),
        (status = 400, description = "Missing field, bad image or unknown reference")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<BookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_new_book()?;
    let id = state.book_repo.create(input).await?;
    tracing::info!("Book {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id_livro": id,
            "message": Resource::Book.created_message()
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated; autores/categorias replace the current sets"),
        (status = 400, description = "Empty body or invalid field"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<BookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = payload.into_patch()?;
    state.book_repo.update(id, patch).await?;

    Ok(Json(json!({ "message": Resource::Book.updated_message() })))
}

#[utoipa::path(
    delete,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book and its association rows deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.book_repo.delete(id).await?;
    tracing::info!("Book {} deleted", id);

    Ok(Json(json!({ "message": Resource::Book.deleted_message() })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> BookRequest {
        serde_json::from_value(json!({
            "nm_livro": "Dom Casmurro",
            "preco": 29.9,
            "pagamento_eletronico": "S",
            "pagamento_dinheiro": "N",
            "entrega_presencial": true,
            "entrega_delivery": 0,
            "img_livro": "ZmFrZQ==",
            "cep": "40070-110",
            "login_comprador": "ana",
            "login_vendedor": "bruno",
            "autores": [1]
        }))
        .unwrap()
    }

    #[test]
    fn new_book_decodes_flags_and_image() {
        let book = full_request().into_new_book().unwrap();
        assert!(book.electronic_payment);
        assert!(!book.cash_payment);
        assert!(!book.shipping_delivery);
        assert_eq!(book.image, b"fake");
        assert_eq!(book.postal_code.value(), 40070110);
        assert_eq!(book.author_ids, vec![1]);
        assert!(book.category_ids.is_empty());
    }

    #[test]
    fn new_book_names_the_missing_field() {
        let mut request = full_request();
        request.preco = None;
        match request.into_new_book() {
            Err(DomainError::Validation(msg)) => assert_eq!(msg, "preco é obrigatório"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(matches!(
            BookRequest::default().into_patch(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn update_rejects_blank_name() {
        let request = BookRequest {
            nm_livro: Some("  ".into()),
            ..Default::default()
        };
        match request.into_patch() {
            Err(DomainError::Validation(msg)) => assert_eq!(msg, "nm_livro é obrigatório"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
