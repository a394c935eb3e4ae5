use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "CATEGORIA")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_CATEGORIA")]
    pub id: i32,
    #[sea_orm(column_name = "NM_CATEGORIA")]
    pub name: String,
    #[sea_orm(column_name = "IMG_CATEGORIA")]
    pub image: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book_categories::Entity")]
    BookCategories,
}

impl Related<super::book_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookCategories.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_categories::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
