use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "USUARIO")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "LOGIN")]
    pub login: String,
    /// argon2 PHC string
    #[sea_orm(column_name = "SENHA")]
    pub password_hash: String,
    #[sea_orm(column_name = "NM_USUARIO")]
    pub name: String,
    #[sea_orm(column_name = "EMAIL_CONTATO")]
    pub contact_email: Option<String>,
}

// Books reference users twice (buyer and seller); those relations are
// declared on the book side.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
