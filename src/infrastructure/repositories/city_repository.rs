//! SeaORM implementation of CityRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};

use super::ensure_affected;
use crate::domain::{City, CityInput, CityRepository, DomainError, Resource};
use crate::models::city::{ActiveModel, Column, Entity as CityEntity, Relation};
use crate::models::state;

/// City joined with its state's name
#[derive(Debug, FromQueryResult)]
struct CityRow {
    id: i32,
    name: String,
    state_id: i32,
    state_name: String,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            state_id: row.state_id,
            state_name: row.state_name,
        }
    }
}

fn select_rows() -> Select<CityEntity> {
    CityEntity::find()
        .select_only()
        .column_as(Column::Id, "id")
        .column_as(Column::Name, "name")
        .column_as(Column::StateId, "state_id")
        .column_as(state::Column::Name, "state_name")
        .join(JoinType::InnerJoin, Relation::State.def())
}

/// SeaORM-based implementation of CityRepository
pub struct SeaOrmCityRepository {
    db: DatabaseConnection,
}

impl SeaOrmCityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CityRepository for SeaOrmCityRepository {
    async fn find_all(&self) -> Result<Vec<City>, DomainError> {
        let rows = select_rows()
            .order_by_asc(Column::Name)
            .into_model::<CityRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<City>, DomainError> {
        let row = select_rows()
            .filter(Column::Id.eq(id))
            .into_model::<CityRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(City::from))
    }

    async fn create(&self, input: CityInput) -> Result<i32, DomainError> {
        let txn = self.db.begin().await?;

        let city = ActiveModel {
            name: Set(input.name),
            state_id: Set(input.state_id),
            ..Default::default()
        };
        let result = CityEntity::insert(city).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, input: CityInput) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = CityEntity::update_many()
            .col_expr(Column::Name, Expr::value(input.name))
            .col_expr(Column::StateId, Expr::value(input.state_id))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await?;
        ensure_affected(result.rows_affected, Resource::City)?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = CityEntity::delete_by_id(id).exec(&txn).await?;
        ensure_affected(result.rows_affected, Resource::City)?;

        txn.commit().await?;
        Ok(())
    }
}
