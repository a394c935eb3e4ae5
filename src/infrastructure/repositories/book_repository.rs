//! SeaORM implementation of BookRepository
//!
//! A book row references a neighborhood (by postal code) and two users; its
//! authors and categories live in the LIVRO_AUTOR / LIVRO_CATEGORIA join
//! tables. Writes touching more than one table share a single transaction.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set, TransactionTrait,
};

use super::category_repository::CategorySummaryRow;
use super::ensure_affected;
use crate::domain::{
    Author, Book, BookPatch, BookRepository, BookSummary, CategorySummary, DomainError, NewBook,
    Resource,
};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Relation};
use crate::models::{author, book_authors, book_categories, category, city, neighborhood, state};

#[derive(Debug, FromQueryResult)]
struct BookSummaryRow {
    id: i32,
    name: String,
    price: f64,
    electronic_payment: bool,
    cash_payment: bool,
    pickup_delivery: bool,
    shipping_delivery: bool,
    postal_code: i64,
    buyer_login: String,
    seller_login: String,
    neighborhood_name: String,
    city_name: String,
    state_name: String,
}

impl From<BookSummaryRow> for BookSummary {
    fn from(row: BookSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            electronic_payment: row.electronic_payment,
            cash_payment: row.cash_payment,
            pickup_delivery: row.pickup_delivery,
            shipping_delivery: row.shipping_delivery,
            postal_code: row.postal_code,
            buyer_login: row.buyer_login,
            seller_login: row.seller_login,
            neighborhood_name: row.neighborhood_name,
            city_name: row.city_name,
            state_name: row.state_name,
        }
    }
}

/// Book columns (minus the image) plus neighborhood, city and state names
fn select_summary() -> Select<BookEntity> {
    BookEntity::find()
        .select_only()
        .column_as(Column::Id, "id")
        .column_as(Column::Name, "name")
        .column_as(Column::Price, "price")
        .column_as(Column::ElectronicPayment, "electronic_payment")
        .column_as(Column::CashPayment, "cash_payment")
        .column_as(Column::PickupDelivery, "pickup_delivery")
        .column_as(Column::ShippingDelivery, "shipping_delivery")
        .column_as(Column::PostalCode, "postal_code")
        .column_as(Column::BuyerLogin, "buyer_login")
        .column_as(Column::SellerLogin, "seller_login")
        .column_as(neighborhood::Column::Name, "neighborhood_name")
        .column_as(city::Column::Name, "city_name")
        .column_as(state::Column::Name, "state_name")
        .join(JoinType::InnerJoin, Relation::Neighborhood.def())
        .join(JoinType::InnerJoin, neighborhood::Relation::City.def())
        .join(JoinType::InnerJoin, city::Relation::State.def())
}

async fn link_authors<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    author_ids: &[i32],
) -> Result<(), DomainError> {
    if author_ids.is_empty() {
        return Ok(());
    }

    let links = author_ids.iter().map(|author_id| book_authors::ActiveModel {
        author_id: Set(*author_id),
        book_id: Set(book_id),
    });
    book_authors::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    category_ids: &[i32],
) -> Result<(), DomainError> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let links = category_ids
        .iter()
        .map(|category_id| book_categories::ActiveModel {
            category_id: Set(*category_id),
            book_id: Set(book_id),
        });
    book_categories::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

async fn unlink_authors<C: ConnectionTrait>(conn: &C, book_id: i32) -> Result<(), DomainError> {
    book_authors::Entity::delete_many()
        .filter(book_authors::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;
    Ok(())
}

async fn unlink_categories<C: ConnectionTrait>(conn: &C, book_id: i32) -> Result<(), DomainError> {
    book_categories::Entity::delete_many()
        .filter(book_categories::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn authors_of(&self, book_id: i32) -> Result<Vec<Author>, DomainError> {
        let authors = author::Entity::find()
            .join(JoinType::InnerJoin, author::Relation::BookAuthors.def())
            .filter(book_authors::Column::BookId.eq(book_id))
            .order_by_asc(author::Column::Name)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn categories_of(&self, book_id: i32) -> Result<Vec<CategorySummary>, DomainError> {
        let rows = category::Entity::find()
            .select_only()
            .column_as(category::Column::Id, "id")
            .column_as(category::Column::Name, "name")
            .join(JoinType::InnerJoin, category::Relation::BookCategories.def())
            .filter(book_categories::Column::BookId.eq(book_id))
            .order_by_asc(category::Column::Name)
            .into_model::<CategorySummaryRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(CategorySummary::from).collect())
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<BookSummary>, DomainError> {
        let rows = select_summary()
            .order_by_asc(Column::Name)
            .into_model::<BookSummaryRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(BookSummary::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(row) = select_summary()
            .filter(Column::Id.eq(id))
            .into_model::<BookSummaryRow>()
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let image = BookEntity::find_by_id(id)
            .select_only()
            .column(Column::Image)
            .into_tuple::<Vec<u8>>()
            .one(&self.db)
            .await?
            .unwrap_or_default();

        let authors = self.authors_of(id).await?;
        let categories = self.categories_of(id).await?;

        Ok(Some(Book {
            summary: row.into(),
            image,
            authors,
            categories,
        }))
    }

    async fn create(&self, input: NewBook) -> Result<i32, DomainError> {
        let txn = self.db.begin().await?;

        let book = ActiveModel {
            name: Set(input.name),
            price: Set(input.price),
            electronic_payment: Set(input.electronic_payment),
            cash_payment: Set(input.cash_payment),
            pickup_delivery: Set(input.pickup_delivery),
            shipping_delivery: Set(input.shipping_delivery),
            image: Set(input.image),
            postal_code: Set(input.postal_code.value()),
            buyer_login: Set(input.buyer_login.into_inner()),
            seller_login: Set(input.seller_login.into_inner()),
            ..Default::default()
        };
        let book_id = BookEntity::insert(book).exec(&txn).await?.last_insert_id;

        link_authors(&txn, book_id, &input.author_ids).await?;
        link_categories(&txn, book_id, &input.category_ids).await?;

        txn.commit().await?;
        tracing::debug!(
            "Book {} created with {} author(s) and {} category(ies)",
            book_id,
            input.author_ids.len(),
            input.category_ids.len()
        );
        Ok(book_id)
    }

    async fn update(&self, id: i32, patch: BookPatch) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        if patch.touches_row() {
            let mut query = BookEntity::update_many().filter(Column::Id.eq(id));
            if let Some(name) = patch.name {
                query = query.col_expr(Column::Name, Expr::value(name));
            }
            if let Some(price) = patch.price {
                query = query.col_expr(Column::Price, Expr::value(price));
            }
            if let Some(flag) = patch.electronic_payment {
                query = query.col_expr(Column::ElectronicPayment, Expr::value(flag));
            }
            if let Some(flag) = patch.cash_payment {
                query = query.col_expr(Column::CashPayment, Expr::value(flag));
            }
            if let Some(flag) = patch.pickup_delivery {
                query = query.col_expr(Column::PickupDelivery, Expr::value(flag));
            }
            if let Some(flag) = patch.shipping_delivery {
                query = query.col_expr(Column::ShippingDelivery, Expr::value(flag));
            }
            if let Some(image) = patch.image {
                query = query.col_expr(Column::Image, Expr::value(image));
            }
            if let Some(postal_code) = patch.postal_code {
                query = query.col_expr(Column::PostalCode, Expr::value(postal_code.value()));
            }
            if let Some(login) = patch.buyer_login {
                query = query.col_expr(Column::BuyerLogin, Expr::value(login.into_inner()));
            }
            if let Some(login) = patch.seller_login {
                query = query.col_expr(Column::SellerLogin, Expr::value(login.into_inner()));
            }

            let result = query.exec(&txn).await?;
            ensure_affected(result.rows_affected, Resource::Book)?;
        } else {
            let existing = BookEntity::find_by_id(id).count(&txn).await?;
            ensure_affected(existing, Resource::Book)?;
        }

        if let Some(author_ids) = patch.author_ids {
            unlink_authors(&txn, id).await?;
            link_authors(&txn, id, &author_ids).await?;
        }
        if let Some(category_ids) = patch.category_ids {
            unlink_categories(&txn, id).await?;
            link_categories(&txn, id, &category_ids).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        unlink_authors(&txn, id).await?;
        unlink_categories(&txn, id).await?;
        let result = BookEntity::delete_by_id(id).exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::Book)?;

        txn.commit().await?;
        Ok(())
    }
}
