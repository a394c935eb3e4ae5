//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::ensure_affected;
use crate::domain::{Author, AuthorInput, AuthorRepository, DomainError, Resource};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;

        Ok(author.map(Author::from))
    }

    async fn create(&self, input: AuthorInput) -> Result<i32, DomainError> {
        let txn = self.db.begin().await?;

        let author = ActiveModel {
            name: Set(input.name),
            ..Default::default()
        };
        let result = AuthorEntity::insert(author).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, input: AuthorInput) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = AuthorEntity::update_many()
            .col_expr(Column::Name, Expr::value(input.name))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await?;
        ensure_affected(result.rows_affected, Resource::Author)?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = AuthorEntity::delete_by_id(id).exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::Author)?;

        txn.commit().await?;
        Ok(())
    }
}
