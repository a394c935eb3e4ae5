use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "LIVRO")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID_LIVRO")]
    pub id: i32,
    #[sea_orm(column_name = "NM_LIVRO")]
    pub name: String,
    #[sea_orm(column_name = "PRECO")]
    pub price: f64,
    #[sea_orm(column_name = "PAGAMENTO_ELETRONICO")]
    pub electronic_payment: bool,
    #[sea_orm(column_name = "PAGAMENTO_DINHEIRO")]
    pub cash_payment: bool,
    #[sea_orm(column_name = "ENTREGA_PRESENCIAL")]
    pub pickup_delivery: bool,
    #[sea_orm(column_name = "ENTREGA_DELIVERY")]
    pub shipping_delivery: bool,
    #[sea_orm(column_name = "IMG_LIVRO")]
    pub image: Vec<u8>,
    #[sea_orm(column_name = "CEP")]
    pub postal_code: i64,
    #[sea_orm(column_name = "LOGIN_COMPRADOR")]
    pub buyer_login: String,
    #[sea_orm(column_name = "LOGIN_VENDEDOR")]
    pub seller_login: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::neighborhood::Entity",
        from = "Column::PostalCode",
        to = "super::neighborhood::Column::PostalCode"
    )]
    Neighborhood,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerLogin",
        to = "super::user::Column::Login"
    )]
    Buyer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SellerLogin",
        to = "super::user::Column::Login"
    )]
    Seller,
    #[sea_orm(has_many = "super::book_authors::Entity")]
    BookAuthors,
    #[sea_orm(has_many = "super::book_categories::Entity")]
    BookCategories,
}

impl Related<super::neighborhood::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Neighborhood.def()
    }
}

impl Related<super::book_authors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookAuthors.def()
    }
}

impl Related<super::book_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookCategories.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_authors::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_authors::Relation::Book.def().rev())
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_categories::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
