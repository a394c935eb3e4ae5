//! SeaORM implementation of NeighborhoodRepository

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};

use super::ensure_affected;
use crate::domain::{
    DomainError, Neighborhood, NeighborhoodRepository, NeighborhoodUpdate, NewNeighborhood,
    PostalCode, Resource,
};
use crate::models::neighborhood::{ActiveModel, Column, Entity as NeighborhoodEntity, Relation};
use crate::models::{city, state};

#[derive(Debug, FromQueryResult)]
struct NeighborhoodRow {
    postal_code: i64,
    name: String,
    city_id: i32,
    city_name: String,
    state_name: String,
}

impl From<NeighborhoodRow> for Neighborhood {
    fn from(row: NeighborhoodRow) -> Self {
        Self {
            postal_code: row.postal_code,
            name: row.name,
            city_id: row.city_id,
            city_name: row.city_name,
            state_name: row.state_name,
        }
    }
}

fn select_rows() -> Select<NeighborhoodEntity> {
    NeighborhoodEntity::find()
        .select_only()
        .column_as(Column::PostalCode, "postal_code")
        .column_as(Column::Name, "name")
        .column_as(Column::CityId, "city_id")
        .column_as(city::Column::Name, "city_name")
        .column_as(state::Column::Name, "state_name")
        .join(JoinType::InnerJoin, Relation::City.def())
        .join(JoinType::InnerJoin, city::Relation::State.def())
}

/// SeaORM-based implementation of NeighborhoodRepository
pub struct SeaOrmNeighborhoodRepository {
    db: DatabaseConnection,
}

impl SeaOrmNeighborhoodRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NeighborhoodRepository for SeaOrmNeighborhoodRepository {
    async fn find_all(&self) -> Result<Vec<Neighborhood>, DomainError> {
        let rows = select_rows()
            .order_by_asc(Column::Name)
            .into_model::<NeighborhoodRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Neighborhood::from).collect())
    }

    async fn find_by_postal_code(
        &self,
        postal_code: PostalCode,
    ) -> Result<Option<Neighborhood>, DomainError> {
        let row = select_rows()
            .filter(Column::PostalCode.eq(postal_code.value()))
            .into_model::<NeighborhoodRow>()
            .one(&self.db)
            .await?;

        Ok(row.map(Neighborhood::from))
    }

    async fn create(&self, input: NewNeighborhood) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let neighborhood = ActiveModel {
            postal_code: Set(input.postal_code.value()),
            name: Set(input.name),
            city_id: Set(input.city_id),
        };
        NeighborhoodEntity::insert(neighborhood)
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn update(
        &self,
        postal_code: PostalCode,
        input: NeighborhoodUpdate,
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = NeighborhoodEntity::update_many()
            .col_expr(Column::Name, Expr::value(input.name))
            .col_expr(Column::CityId, Expr::value(input.city_id))
            .filter(Column::PostalCode.eq(postal_code.value()))
            .exec(&txn)
            .await?;
        ensure_affected(result.rows_affected, Resource::Neighborhood)?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, postal_code: PostalCode) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let result = NeighborhoodEntity::delete_by_id(postal_code.value())
            .exec(&txn)
            .await?;
        ensure_affected(result.rows_affected, Resource::Neighborhood)?;

        txn.commit().await?;
        Ok(())
    }
}
