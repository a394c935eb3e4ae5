//! SeaORM implementation of StateRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::ensure_affected;
use crate::domain::{DomainError, Resource, State, StateInput, StateRepository};
use crate::models::state::{ActiveModel, Column, Entity as StateEntity, Model};

/// SeaORM-based implementation of StateRepository
pub struct SeaOrmStateRepository {
    db: DatabaseConnection,
}

impl SeaOrmStateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for State {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[async_trait]
impl StateRepository for SeaOrmStateRepository {
    async fn find_all(&self) -> Result<Vec<State>, DomainError> {
        let states = StateEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(states.into_iter().map(State::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<State>, DomainError> {
        let state = StateEntity::find_by_id(id).one(&self.db).await?;

        Ok(state.map(State::from))
    }

    async fn create(&self, input: StateInput) -> Result<i32, DomainError> {
        let txn = self.db.begin().await?;

        let state = ActiveModel {
            name: Set(input.name),
            ..Default::default()
        };
        let result = StateEntity::insert(state).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, input: StateInput) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = StateEntity::update_many()
            .col_expr(Column::Name, Expr::value(input.name))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await?;
        ensure_affected(result.rows_affected, Resource::State)?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = StateEntity::delete_by_id(id).exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::State)?;

        txn.commit().await?;
        Ok(())
    }
}
