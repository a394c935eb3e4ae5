//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::ensure_affected;
use crate::domain::{
    Category, CategoryPatch, CategoryRepository, CategorySummary, DomainError, NewCategory,
    Resource,
};
use crate::models::category::{ActiveModel, Column, Entity as CategoryEntity, Model};

/// Category columns without the image blob
#[derive(Debug, FromQueryResult)]
pub(crate) struct CategorySummaryRow {
    pub id: i32,
    pub name: String,
}

impl From<CategorySummaryRow> for CategorySummary {
    fn from(row: CategorySummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            image: model.image,
        }
    }
}

/// SeaORM-based implementation of CategoryRepository
pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_all(&self) -> Result<Vec<CategorySummary>, DomainError> {
        let rows = CategoryEntity::find()
            .select_only()
            .column_as(Column::Id, "id")
            .column_as(Column::Name, "name")
            .order_by_asc(Column::Name)
            .into_model::<CategorySummaryRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(CategorySummary::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DomainError> {
        let category = CategoryEntity::find_by_id(id).one(&self.db).await?;

        Ok(category.map(Category::from))
    }

    async fn create(&self, input: NewCategory) -> Result<i32, DomainError> {
        let txn = self.db.begin().await?;

        let category = ActiveModel {
            name: Set(input.name),
            image: Set(Some(input.image)),
            ..Default::default()
        };
        let result = CategoryEntity::insert(category).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, patch: CategoryPatch) -> Result<(), DomainError> {
        let mut query = CategoryEntity::update_many()
            .col_expr(Column::Name, Expr::value(patch.name))
            .filter(Column::Id.eq(id));
        if let Some(image) = patch.image {
            query = query.col_expr(Column::Image, Expr::value(image));
        }

        let txn = self.db.begin().await?;
        let result = query.exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::Category)?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = CategoryEntity::delete_by_id(id).exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::Category)?;

        txn.commit().await?;
        Ok(())
    }
}
