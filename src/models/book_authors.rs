use sea_orm::entity::prelude::*;

// The table has no uniqueness constraint; the composite key below only
// satisfies the entity model. Duplicate links are possible.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "LIVRO_AUTOR")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "ID_AUTOR")]
    pub author_id: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "ID_LIVRO")]
    pub book_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id"
    )]
    Author,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
