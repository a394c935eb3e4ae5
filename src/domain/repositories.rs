//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.
//!
//! Read types serialize with the store's column names, which is the shape
//! existing clients consume. Write inputs are plain structs; update inputs
//! ("patches") carry `Option` fields and only present fields are applied.

use async_trait::async_trait;
use serde::Serialize;

use super::{DomainError, Login, PostalCode};
use crate::utils::image;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    #[serde(rename = "ID_ESTADO")]
    pub id: i32,
    #[serde(rename = "NM_ESTADO")]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct StateInput {
    pub name: String,
}

#[async_trait]
pub trait StateRepository: Send + Sync {
    /// All states ordered by name
    async fn find_all(&self) -> Result<Vec<State>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<State>, DomainError>;

    /// Returns the generated id
    async fn create(&self, input: StateInput) -> Result<i32, DomainError>;

    async fn update(&self, id: i32, input: StateInput) -> Result<(), DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    #[serde(rename = "ID_CIDADE")]
    pub id: i32,
    #[serde(rename = "NM_CIDADE")]
    pub name: String,
    #[serde(rename = "ID_ESTADO")]
    pub state_id: i32,
    #[serde(rename = "NM_ESTADO")]
    pub state_name: String,
}

#[derive(Debug, Clone)]
pub struct CityInput {
    pub name: String,
    pub state_id: i32,
}

#[async_trait]
pub trait CityRepository: Send + Sync {
    /// All cities with their state's name, ordered by city name
    async fn find_all(&self) -> Result<Vec<City>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<City>, DomainError>;

    async fn create(&self, input: CityInput) -> Result<i32, DomainError>;

    async fn update(&self, id: i32, input: CityInput) -> Result<(), DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// Neighborhood
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighborhood {
    #[serde(rename = "CEP")]
    pub postal_code: i64,
    #[serde(rename = "NM_BAIRRO")]
    pub name: String,
    #[serde(rename = "ID_CIDADE")]
    pub city_id: i32,
    #[serde(rename = "NM_CIDADE")]
    pub city_name: String,
    #[serde(rename = "NM_ESTADO")]
    pub state_name: String,
}

#[derive(Debug, Clone)]
pub struct NewNeighborhood {
    pub postal_code: PostalCode,
    pub name: String,
    pub city_id: i32,
}

#[derive(Debug, Clone)]
pub struct NeighborhoodUpdate {
    pub name: String,
    pub city_id: i32,
}

#[async_trait]
pub trait NeighborhoodRepository: Send + Sync {
    /// All neighborhoods with city and state names, ordered by name
    async fn find_all(&self) -> Result<Vec<Neighborhood>, DomainError>;

    async fn find_by_postal_code(
        &self,
        postal_code: PostalCode,
    ) -> Result<Option<Neighborhood>, DomainError>;

    async fn create(&self, input: NewNeighborhood) -> Result<(), DomainError>;

    async fn update(
        &self,
        postal_code: PostalCode,
        input: NeighborhoodUpdate,
    ) -> Result<(), DomainError>;

    async fn delete(&self, postal_code: PostalCode) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Public view of a user; the password never leaves the repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    #[serde(rename = "LOGIN")]
    pub login: String,
    #[serde(rename = "NM_USUARIO")]
    pub name: String,
    #[serde(rename = "EMAIL_CONTATO")]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: Login,
    pub password: String,
    pub name: String,
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserPatch {
    pub name: String,
    pub password: Option<String>,
    /// `Some(None)` clears the stored address
    pub contact_email: Option<Option<String>>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by display name
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, DomainError>;

    async fn create(&self, input: NewUser) -> Result<(), DomainError>;

    async fn update(&self, login: &Login, patch: UserPatch) -> Result<(), DomainError>;

    async fn delete(&self, login: &Login) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    #[serde(rename = "ID_AUTOR")]
    pub id: i32,
    #[serde(rename = "NM_AUTOR")]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AuthorInput {
    pub name: String,
}

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors ordered by name
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    /// Create a new author, returning its id
    async fn create(&self, input: AuthorInput) -> Result<i32, DomainError>;

    async fn update(&self, id: i32, input: AuthorInput) -> Result<(), DomainError>;

    /// Delete an author by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Category without its image, used by listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    #[serde(rename = "ID_CATEGORIA")]
    pub id: i32,
    #[serde(rename = "NM_CATEGORIA")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(rename = "ID_CATEGORIA")]
    pub id: i32,
    #[serde(rename = "NM_CATEGORIA")]
    pub name: String,
    #[serde(
        rename = "IMG_CATEGORIA",
        serialize_with = "image::serialize_optional_base64"
    )]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub image: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CategoryPatch {
    pub name: String,
    pub image: Option<Vec<u8>>,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Summaries ordered by name; images are left out
    async fn find_all(&self) -> Result<Vec<CategorySummary>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DomainError>;

    async fn create(&self, input: NewCategory) -> Result<i32, DomainError>;

    async fn update(&self, id: i32, patch: CategoryPatch) -> Result<(), DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

/// Book row without its image, plus the names of its location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    #[serde(rename = "ID_LIVRO")]
    pub id: i32,
    #[serde(rename = "NM_LIVRO")]
    pub name: String,
    #[serde(rename = "PRECO")]
    pub price: f64,
    #[serde(rename = "PAGAMENTO_ELETRONICO")]
    pub electronic_payment: bool,
    #[serde(rename = "PAGAMENTO_DINHEIRO")]
    pub cash_payment: bool,
    #[serde(rename = "ENTREGA_PRESENCIAL")]
    pub pickup_delivery: bool,
    #[serde(rename = "ENTREGA_DELIVERY")]
    pub shipping_delivery: bool,
    #[serde(rename = "CEP")]
    pub postal_code: i64,
    #[serde(rename = "LOGIN_COMPRADOR")]
    pub buyer_login: String,
    #[serde(rename = "LOGIN_VENDEDOR")]
    pub seller_login: String,
    #[serde(rename = "NM_BAIRRO")]
    pub neighborhood_name: String,
    #[serde(rename = "NM_CIDADE")]
    pub city_name: String,
    #[serde(rename = "NM_ESTADO")]
    pub state_name: String,
}

/// Full book with image and its associations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    #[serde(flatten)]
    pub summary: BookSummary,
    #[serde(rename = "IMG_LIVRO", serialize_with = "image::serialize_base64")]
    pub image: Vec<u8>,
    #[serde(rename = "autores")]
    pub authors: Vec<Author>,
    #[serde(rename = "categorias")]
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub name: String,
    pub price: f64,
    pub electronic_payment: bool,
    pub cash_payment: bool,
    pub pickup_delivery: bool,
    pub shipping_delivery: bool,
    pub image: Vec<u8>,
    pub postal_code: PostalCode,
    pub buyer_login: Login,
    pub seller_login: Login,
    pub author_ids: Vec<i32>,
    pub category_ids: Vec<i32>,
}

/// Partial book update. `author_ids`/`category_ids`, when present, replace
/// the whole association set.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub electronic_payment: Option<bool>,
    pub cash_payment: Option<bool>,
    pub pickup_delivery: Option<bool>,
    pub shipping_delivery: Option<bool>,
    pub image: Option<Vec<u8>>,
    pub postal_code: Option<PostalCode>,
    pub buyer_login: Option<Login>,
    pub seller_login: Option<Login>,
    pub author_ids: Option<Vec<i32>>,
    pub category_ids: Option<Vec<i32>>,
}

impl BookPatch {
    /// True when at least one column of the book row changes
    pub fn touches_row(&self) -> bool {
        self.name.is_some()
            || self.price.is_some()
            || self.electronic_payment.is_some()
            || self.cash_payment.is_some()
            || self.pickup_delivery.is_some()
            || self.shipping_delivery.is_some()
            || self.image.is_some()
            || self.postal_code.is_some()
            || self.buyer_login.is_some()
            || self.seller_login.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_row() && self.author_ids.is_none() && self.category_ids.is_none()
    }
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All book summaries ordered by name
    async fn find_all(&self) -> Result<Vec<BookSummary>, DomainError>;

    /// A single book with image, authors and categories
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Insert the book and its association rows in one transaction
    async fn create(&self, input: NewBook) -> Result<i32, DomainError>;

    async fn update(&self, id: i32, patch: BookPatch) -> Result<(), DomainError>;

    /// Delete association rows, then the book, in one transaction
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_touches_nothing() {
        let patch = BookPatch::default();
        assert!(patch.is_empty());
        assert!(!patch.touches_row());
    }

    #[test]
    fn association_only_patch_leaves_row_alone() {
        let patch = BookPatch {
            author_ids: Some(vec![2, 3]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(!patch.touches_row());
    }

    #[test]
    fn category_serializes_image_as_base64() {
        let category = Category {
            id: 1,
            name: "Romance".to_string(),
            image: Some(b"fake_image_data".to_vec()),
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["IMG_CATEGORIA"], "ZmFrZV9pbWFnZV9kYXRh");
        assert_eq!(json["NM_CATEGORIA"], "Romance");
    }
}
