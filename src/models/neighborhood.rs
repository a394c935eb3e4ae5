use sea_orm::entity::prelude::*;

/// Neighborhoods are keyed by their postal code (CEP), not a surrogate id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "BAIRRO")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "CEP")]
    pub postal_code: i64,
    #[sea_orm(column_name = "NM_BAIRRO")]
    pub name: String,
    #[sea_orm(column_name = "ID_CIDADE")]
    pub city_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
