use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "CIDADE")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_CIDADE")]
    pub id: i32,
    #[sea_orm(column_name = "NM_CIDADE")]
    pub name: String,
    #[sea_orm(column_name = "ID_ESTADO")]
    pub state_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::state::Entity",
        from = "Column::StateId",
        to = "super::state::Column::Id"
    )]
    State,
    #[sea_orm(has_many = "super::neighborhood::Entity")]
    Neighborhood,
}

impl Related<super::state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::State.def()
    }
}

impl Related<super::neighborhood::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Neighborhood.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
